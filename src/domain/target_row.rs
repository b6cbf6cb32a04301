use crate::domain::errors::GenerationError;

pub const SERVER_COLUMN: &str = "server";
pub const DATABASE_COLUMN: &str = "database";

/// One validated line of the input table: where to connect and which
/// database to switch to before replaying the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub server: String,
    pub database: String,
}

/// What to do when a data row fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Abort the whole run on the first invalid row. No output is written.
    #[default]
    FailFast,
    /// Drop invalid rows and renumber the survivors compactly.
    SkipInvalid,
}

/// Column positions resolved from a strictly validated header.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    server_index: usize,
    database_index: usize,
    column_count: usize,
}

impl TableSchema {
    /// Requires the trimmed header to contain exactly `server` and
    /// `database`, in either order. Anything else fails the run before a
    /// single data row is looked at.
    pub fn from_headers(headers: &[String]) -> Result<Self, GenerationError> {
        let trimmed = headers.iter().map(|h| h.trim()).collect::<Vec<_>>();

        let server_positions = positions_of(&trimmed, SERVER_COLUMN);
        let database_positions = positions_of(&trimmed, DATABASE_COLUMN);

        let exact_match = trimmed.len() == 2
            && server_positions.len() == 1
            && database_positions.len() == 1;
        if !exact_match {
            return Err(GenerationError::Schema {
                found: trimmed.join(", "),
            });
        }

        Ok(Self {
            server_index: server_positions[0],
            database_index: database_positions[0],
            column_count: trimmed.len(),
        })
    }

    /// Normalizes one data record into a `TargetRow`. `row` is the 1-based
    /// position within the data rows and only feeds diagnostics.
    pub fn row_from_record(
        &self,
        row: usize,
        record: &[String],
    ) -> Result<TargetRow, GenerationError> {
        if record.len() != self.column_count {
            return Err(GenerationError::MalformedRow {
                row,
                expected: self.column_count,
                found: record.len(),
            });
        }

        let server = record[self.server_index].trim();
        if server.is_empty() {
            return Err(GenerationError::BlankField {
                row,
                field: SERVER_COLUMN,
            });
        }

        let database = record[self.database_index].trim();
        if database.is_empty() {
            return Err(GenerationError::BlankField {
                row,
                field: DATABASE_COLUMN,
            });
        }

        Ok(TargetRow {
            server: server.to_string(),
            database: database.to_string(),
        })
    }
}

fn positions_of(headers: &[&str], name: &str) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| **header == name)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::TableSchema;
    use crate::domain::errors::GenerationError;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn accepts_expected_header_in_either_order() {
        for order in [&["server", "database"][..], &["database", "server"][..]] {
            let schema = TableSchema::from_headers(&headers(order))
                .expect("header should be accepted");
            let row = schema
                .row_from_record(1, &headers(order))
                .expect("row should validate");
            assert_eq!(row.server, "server");
            assert_eq!(row.database, "database");
        }
    }

    #[test]
    fn trims_header_whitespace() {
        let schema = TableSchema::from_headers(&headers(&[" server ", "database"]))
            .expect("padded header should be accepted");
        let row = schema
            .row_from_record(1, &headers(&["srvA", "db1"]))
            .expect("row should validate");
        assert_eq!(row.server, "srvA");
    }

    #[test]
    fn rejects_missing_extra_renamed_or_duplicate_columns() {
        let bad_headers = [
            vec!["server"],
            vec!["server", "database", "port"],
            vec!["server", "db"],
            vec!["server", "server"],
            vec!["Server", "database"],
        ];
        for bad in bad_headers {
            let result = TableSchema::from_headers(&headers(&bad));
            assert!(
                matches!(result, Err(GenerationError::Schema { .. })),
                "header {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn trims_row_fields() {
        let schema = TableSchema::from_headers(&headers(&["server", "database"]))
            .expect("header should be accepted");
        let row = schema
            .row_from_record(1, &headers(&["  srvA  ", "\tdb1 "]))
            .expect("row should validate");
        assert_eq!(row.server, "srvA");
        assert_eq!(row.database, "db1");
    }

    #[test]
    fn blank_field_reports_row_number_and_field() {
        let schema = TableSchema::from_headers(&headers(&["server", "database"]))
            .expect("header should be accepted");

        let error = schema
            .row_from_record(4, &headers(&["srvA", "   "]))
            .expect_err("blank database should be rejected");
        assert!(
            matches!(error, GenerationError::BlankField { row: 4, field: "database" }),
            "unexpected error: {error}"
        );

        let error = schema
            .row_from_record(7, &headers(&["", "db1"]))
            .expect_err("blank server should be rejected");
        assert!(matches!(
            error,
            GenerationError::BlankField { row: 7, field: "server" }
        ));
    }

    #[test]
    fn reports_field_count_mismatch() {
        let schema = TableSchema::from_headers(&headers(&["server", "database"]))
            .expect("header should be accepted");
        let error = schema
            .row_from_record(2, &headers(&["srvA", "db1", "extra"]))
            .expect_err("ragged row should be rejected");
        assert!(matches!(
            error,
            GenerationError::MalformedRow { row: 2, expected: 2, found: 3 }
        ));
    }
}

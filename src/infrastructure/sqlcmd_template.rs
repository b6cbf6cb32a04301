use crate::domain::target_row::TargetRow;

const BANNER: &str = "------------------------------------------------------------";

/// Renders the output script: one fixed header block, then one execution
/// block per validated row, in input order. Values are interpolated
/// verbatim; quoting of embedded quote characters is deliberately not
/// attempted (see DESIGN.md).
#[derive(Debug)]
pub struct SqlcmdScriptTemplate {
    username: String,
    password: String,
    replay_script: String,
}

impl SqlcmdScriptTemplate {
    pub fn new(username: &str, password: &str, replay_script: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            replay_script: replay_script.to_string(),
        }
    }

    /// The complete script text, lines joined with `\n`. Zero rows yields
    /// the header block alone.
    pub fn render(&self, rows: &[TargetRow]) -> String {
        let mut lines = self.header_lines();
        for (index, row) in rows.iter().enumerate() {
            lines.extend(self.row_lines(index + 1, row));
        }
        lines.join("\n")
    }

    fn header_lines(&self) -> Vec<String> {
        vec![
            BANNER.to_string(),
            "-- MULTI-DATABASE SQLCMD SCRIPT".to_string(),
            "-- Enable: Query > SQLCMD Mode".to_string(),
            BANNER.to_string(),
            String::new(),
            format!(":setvar USERNAME \"{}\"", self.username),
            format!(":setvar PASSWORD \"{}\"", self.password),
            format!(":setvar SCRIPT \"{}\"", self.replay_script),
            String::new(),
            BANNER.to_string(),
            "-- BEGIN EXECUTION".to_string(),
            BANNER.to_string(),
            String::new(),
            String::new(),
        ]
    }

    /// One block per row: progress marker, connect, database switch,
    /// script replay, batch terminator, separator.
    fn row_lines(&self, sequence: usize, row: &TargetRow) -> [String; 6] {
        [
            format!("PRINT '--- [{sequence}] {} on {} ---'", row.database, row.server),
            format!(":CONNECT {} -U $(USERNAME) -P $(PASSWORD)", row.server),
            format!("USE [{}];", row.database),
            ":r $(SCRIPT)".to_string(),
            "GO".to_string(),
            String::new(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::SqlcmdScriptTemplate;
    use crate::domain::target_row::TargetRow;

    fn row(server: &str, database: &str) -> TargetRow {
        TargetRow {
            server: server.to_string(),
            database: database.to_string(),
        }
    }

    #[test]
    fn renders_header_then_numbered_blocks_in_order() {
        let template = SqlcmdScriptTemplate::new("alice", "s3cret", "check.sql");
        let script = template.render(&[row("srvA", "db1"), row("srvB", "db2")]);

        assert!(script.starts_with(
            "------------------------------------------------------------\n\
             -- MULTI-DATABASE SQLCMD SCRIPT"
        ));
        assert!(script.contains(":setvar USERNAME \"alice\""));
        assert!(script.contains(":setvar PASSWORD \"s3cret\""));
        assert!(script.contains(":setvar SCRIPT \"check.sql\""));

        let first = script
            .find("PRINT '--- [1] db1 on srvA ---'")
            .expect("first block should be present");
        let second = script
            .find("PRINT '--- [2] db2 on srvB ---'")
            .expect("second block should be present");
        assert!(first < second, "blocks must keep input order");

        assert!(script.contains(":CONNECT srvA -U $(USERNAME) -P $(PASSWORD)"));
        assert!(script.contains("USE [db1];"));
        assert_eq!(script.matches(":r $(SCRIPT)").count(), 2);
        assert_eq!(script.matches("\nGO\n").count(), 2);
    }

    #[test]
    fn zero_rows_render_header_only() {
        let template = SqlcmdScriptTemplate::new("username", "password", "check.sql");
        let script = template.render(&[]);

        assert!(script.contains("-- BEGIN EXECUTION"));
        assert!(!script.contains("PRINT"));
        assert!(!script.contains(":CONNECT"));
    }

    #[test]
    fn repeated_rows_each_get_their_own_block() {
        let template = SqlcmdScriptTemplate::new("u", "p", "s.sql");
        let script = template.render(&[row("srvA", "db1"), row("srvA", "db1")]);

        assert!(script.contains("PRINT '--- [1] db1 on srvA ---'"));
        assert!(script.contains("PRINT '--- [2] db1 on srvA ---'"));
        assert_eq!(script.matches(":CONNECT srvA").count(), 2);
    }

    #[test]
    fn values_are_embedded_verbatim() {
        // Pins the no-escaping behavior: a quote in a credential passes
        // straight through into the generated text.
        let template = SqlcmdScriptTemplate::new("ali\"ce", "p", "s.sql");
        let script = template.render(&[]);

        assert!(script.contains(":setvar USERNAME \"ali\"ce\""));
    }
}

use std::{fs, io::ErrorKind, path::Path};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::domain::errors::GenerationError;

/// Encodings tried in order when decoding the input table. Spreadsheet
/// tools on Windows still export legacy code-page CSVs, so a clean UTF-8
/// decode is attempted first and windows-1252 catches the rest.
const ENCODING_CANDIDATES: [&Encoding; 2] = [UTF_8, WINDOWS_1252];

/// The input table after decoding and CSV parsing: the raw header fields
/// and one string record per data row, untouched by any validation.
#[derive(Debug)]
pub struct DecodedTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Reads and decodes the table in one pass. A file that decodes under no
/// candidate encoding fails whole; garbled text never escapes this module.
pub fn read_table(path: &Path) -> Result<DecodedTable, GenerationError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            GenerationError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GenerationError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let text = decode_bytes(&bytes).ok_or_else(|| GenerationError::Encoding {
        path: path.to_path_buf(),
        tried: candidate_names(),
    })?;

    parse_csv_text(&text)
}

/// First candidate that decodes without replacement characters wins.
/// `Encoding::decode` is BOM-aware, so a UTF-8 BOM is stripped rather than
/// leaking into the first header name.
fn decode_bytes(bytes: &[u8]) -> Option<String> {
    for encoding in ENCODING_CANDIDATES {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some(decoded.into_owned());
        }
    }
    None
}

fn candidate_names() -> String {
    ENCODING_CANDIDATES
        .iter()
        .map(|encoding| encoding.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits decoded text into header and data records. Records are read
/// flexibly; field-count enforcement belongs to the schema validator so
/// that ragged rows get a per-row diagnostic instead of a parser error.
fn parse_csv_text(text: &str) -> Result<DecodedTable, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = reader.records().map(|record| {
        record.map(|fields| {
            fields
                .iter()
                .map(|field| field.to_string())
                .collect::<Vec<_>>()
        })
    });

    let headers = match rows.next() {
        Some(Ok(fields)) => fields,
        Some(Err(error)) => {
            return Err(GenerationError::Schema {
                found: format!("unreadable header ({error})"),
            });
        }
        None => {
            return Err(GenerationError::Schema {
                found: "empty file".to_string(),
            });
        }
    };

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let fields = row.map_err(|_| GenerationError::MalformedRow {
            row: index + 1,
            expected: headers.len(),
            found: 0,
        })?;
        records.push(fields);
    }

    Ok(DecodedTable { headers, records })
}

use std::fs;

use chrono::Local;

use crate::{
    application::commands::{GenerateScriptCommand, GenerateScriptResult},
    domain::{
        errors::GenerationError,
        target_row::{RowPolicy, TableSchema, TargetRow},
    },
    infrastructure::{
        encoded_table::read_table,
        output_path::{disambiguate, resolve_output_path},
        sqlcmd_template::SqlcmdScriptTemplate,
    },
};

/// Single-pass generation: read and decode the table, validate the header
/// and every row, assemble the script text, then write it in one call.
/// Nothing touches the filesystem output until validation has fully passed.
#[derive(Debug, Default)]
pub struct GenerateSqlcmdScriptUseCase;

impl GenerateSqlcmdScriptUseCase {
    pub fn execute(
        &self,
        command: GenerateScriptCommand,
    ) -> Result<GenerateScriptResult, GenerationError> {
        let output_path = resolve_output_path(&command.input_table_path, Local::now());

        let table = read_table(&command.input_table_path)?;
        let schema = TableSchema::from_headers(&table.headers)?;

        let mut rows: Vec<TargetRow> = Vec::with_capacity(table.records.len());
        let mut skipped_rows = 0usize;
        for (index, record) in table.records.iter().enumerate() {
            match schema.row_from_record(index + 1, record) {
                Ok(row) => rows.push(row),
                Err(error)
                    if command.row_policy == RowPolicy::SkipInvalid
                        && error.is_row_error() =>
                {
                    skipped_rows += 1;
                }
                Err(error) => return Err(error),
            }
        }

        let template = SqlcmdScriptTemplate::new(
            &command.username,
            &command.password,
            &command.replay_script_path.display().to_string(),
        );
        let script = template.render(&rows);

        if let Some(output_dir) = output_path.parent() {
            fs::create_dir_all(output_dir).map_err(|source| GenerationError::Io {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }
        let output_path = disambiguate(output_path);
        fs::write(&output_path, script).map_err(|source| GenerationError::Io {
            path: output_path.clone(),
            source,
        })?;
        // The caller displays this path; hand back an absolute one even
        // when the input table was given relative.
        let output_path = fs::canonicalize(&output_path).map_err(|source| GenerationError::Io {
            path: output_path.clone(),
            source,
        })?;

        Ok(GenerateScriptResult {
            output_path,
            row_count: rows.len(),
            skipped_rows,
        })
    }
}

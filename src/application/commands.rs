use std::path::PathBuf;

use crate::domain::target_row::RowPolicy;

#[derive(Debug)]
pub struct GenerateScriptCommand {
    pub input_table_path: PathBuf,
    pub replay_script_path: PathBuf,
    pub username: String,
    pub password: String,
    pub row_policy: RowPolicy,
}

#[derive(Debug)]
pub struct GenerateScriptResult {
    pub output_path: PathBuf,
    pub row_count: usize,
    pub skipped_rows: usize,
}

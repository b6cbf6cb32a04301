pub mod encoded_table;
pub mod output_path;
pub mod sqlcmd_template;

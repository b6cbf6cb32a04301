pub mod errors;
pub mod target_row;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Generated scripts land in this subdirectory beside the input table so
/// reruns never clutter the directory the CSV lives in.
pub const OUTPUT_SUBDIR: &str = "generated";

const OUTPUT_PREFIX: &str = "run_all";
const OUTPUT_EXTENSION: &str = "sql";

/// Destination for one run: `<table dir>/generated/run_all_<stamp>.sql`.
/// The timestamp has whole-second granularity; collisions are handled at
/// write time by `disambiguate`.
pub fn resolve_output_path(input_table_path: &Path, timestamp: DateTime<Local>) -> PathBuf {
    let table_dir = input_table_path.parent().unwrap_or_else(|| Path::new("."));
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    table_dir
        .join(OUTPUT_SUBDIR)
        .join(format!("{OUTPUT_PREFIX}_{stamp}.{OUTPUT_EXTENSION}"))
}

/// Returns the first of `path`, `path_2`, `path_3`, … that does not exist
/// yet, so two runs within the same second get distinct files.
pub fn disambiguate(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(OUTPUT_PREFIX)
        .to_string();
    let parent = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    let mut attempt = 2u32;
    loop {
        let candidate = parent.join(format!("{stem}_{attempt}.{OUTPUT_EXTENSION}"));
        if !candidate.exists() {
            return candidate;
        }
        attempt += 1;
    }
}

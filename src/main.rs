mod application;
mod domain;
mod infrastructure;
mod interfaces;

use anyhow::Result;
use console::style;

use crate::application::use_cases::generate_sqlcmd_script::GenerateSqlcmdScriptUseCase;
use crate::interfaces::cli::collect_generate_command;

fn main() -> Result<()> {
    let command = collect_generate_command()?;
    let use_case = GenerateSqlcmdScriptUseCase::default();

    println!("{}", style("Generating SQLCMD script...").cyan());
    let result = use_case.execute(command)?;

    if result.skipped_rows > 0 {
        println!(
            "{} {} invalid row(s) skipped",
            style("Warning:").yellow().bold(),
            result.skipped_rows,
        );
    }
    println!(
        "{} {} ({} databases)",
        style("SQLCMD script has been saved to").green(),
        style(result.output_path.display()).bold(),
        result.row_count,
    );
    Ok(())
}

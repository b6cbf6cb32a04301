use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::{application::commands::GenerateScriptCommand, domain::target_row::RowPolicy};

const DEFAULT_USERNAME: &str = "username";
const DEFAULT_PASSWORD: &str = "password";

#[derive(Debug, Parser)]
#[command(
    name = "sqlcmd-fanout",
    version,
    about = "Generate a multi-server SQLCMD script from a server/database CSV"
)]
struct CliArgs {
    #[arg(long, short = 'i', help = "CSV file with 'server' and 'database' columns")]
    input: Option<PathBuf>,
    #[arg(long, short = 'q', help = "SQL script replayed against every database")]
    script: Option<PathBuf>,
    #[arg(long, short = 'u', default_value = DEFAULT_USERNAME)]
    user: String,
    #[arg(long, short = 'p', default_value = DEFAULT_PASSWORD)]
    password: String,
    #[arg(long, help = "Skip rows with blank fields instead of failing the run")]
    skip_invalid_rows: bool,
}

pub fn collect_generate_command() -> Result<GenerateScriptCommand> {
    if env::args_os().len() == 1 {
        return collect_interactive_command();
    }
    collect_command_from_args(CliArgs::parse())
}

fn collect_command_from_args(args: CliArgs) -> Result<GenerateScriptCommand> {
    let input = args
        .input
        .ok_or_else(|| anyhow!("--input is required when using argument mode"))?;
    let script = args
        .script
        .ok_or_else(|| anyhow!("--script is required when using argument mode"))?;

    ensure_file_exists(&input, "CSV file")?;
    ensure_file_exists(&script, "SQL script file")?;

    Ok(GenerateScriptCommand {
        input_table_path: input,
        replay_script_path: script,
        username: ensure_non_empty_value(args.user, "Username")?,
        password: ensure_non_empty_value(args.password, "Password")?,
        row_policy: row_policy_from_flag(args.skip_invalid_rows),
    })
}

fn collect_interactive_command() -> Result<GenerateScriptCommand> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" SQLCMD FANOUT ").black().on_cyan().bold().underlined()
    );
    println!(
        "{}",
        style("Replay one SQL script across many servers and databases").dim()
    );
    println!();

    let input: String = Input::with_theme(&theme)
        .with_prompt("Server/database CSV")
        .validate_with(|value: &String| {
            if PathBuf::from(value.trim()).is_file() {
                Ok(())
            } else {
                Err("CSV file not found")
            }
        })
        .interact_text()?;

    let script: String = Input::with_theme(&theme)
        .with_prompt("SQL script to replay")
        .validate_with(|value: &String| {
            if PathBuf::from(value.trim()).is_file() {
                Ok(())
            } else {
                Err("SQL script file not found")
            }
        })
        .interact_text()?;

    let username: String = Input::with_theme(&theme)
        .with_prompt("SQLCMD username")
        .default(DEFAULT_USERNAME.to_string())
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("Username must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let password: String = Input::with_theme(&theme)
        .with_prompt("SQLCMD password")
        .default(DEFAULT_PASSWORD.to_string())
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("Password must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let skip_invalid_rows = Confirm::with_theme(&theme)
        .with_prompt("Skip rows with blank fields instead of failing?")
        .default(false)
        .interact()?;

    Ok(GenerateScriptCommand {
        input_table_path: PathBuf::from(input.trim()),
        replay_script_path: PathBuf::from(script.trim()),
        username: username.trim().to_string(),
        password: password.trim().to_string(),
        row_policy: row_policy_from_flag(skip_invalid_rows),
    })
}

fn row_policy_from_flag(skip_invalid_rows: bool) -> RowPolicy {
    if skip_invalid_rows {
        RowPolicy::SkipInvalid
    } else {
        RowPolicy::FailFast
    }
}

fn ensure_file_exists(path: &Path, label: &str) -> Result<()> {
    if !path.is_file() {
        return Err(anyhow!("{label} not found: {}", path.display()));
    }
    Ok(())
}

fn ensure_non_empty_value(value: String, field_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field_name} must not be empty"));
    }
    Ok(value)
}

pub mod generate_sqlcmd_script;

//! nanopost command-line interface

use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::process::ExitCode;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::*;

fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    if std::env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Some(Commands::Init(args)) => init_command(args)?,
        Some(Commands::New(args)) => new_command(args)?,
        Some(Commands::List(args)) => list_command(args)?,
        Some(Commands::Last(args)) => last_command(args)?,
        Some(Commands::Edit(args)) => edit_command(args)?,
        Some(Commands::Doctor) => return doctor_command(),
        None => {
            if !default_has_input(&cli.new) {
                Cli::command().print_help()?;
                return Ok(true);
            }
            new_command(cli.new)?
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use anyhow::{Context, Result};
use log::{debug, warn};
use nanopost::commands::{
    print_doctor_report, run_doctor, run_edit, run_init, run_last, run_list, run_new,
    InitOptions, InquirePrompter, LastOptions, ListOptions, NewInput, NewOptions,
};
use nanopost::PluginHost;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine the current directory")
}

/// Execute the init command
pub fn init_command(args: InitArgs) -> Result<()> {
    debug!("Executing init command with args: {:?}", args);
    let opts = InitOptions {
        github: args.github,
        force: args.force,
    };
    run_init(&current_dir()?, opts, &mut io::stdout().lock())?;
    Ok(())
}

fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("failed to read piped input")?;
    Ok(Some(buf).filter(|s| !s.trim().is_empty()))
}

/// Whether the default command got text, options or piped input
pub fn default_has_input(args: &NewArgs) -> bool {
    args.is_set() || !io::stdin().is_terminal()
}

/// Execute the new command, or the default command with inline text
pub fn new_command(args: NewArgs) -> Result<()> {
    debug!("Executing new command with args: {:?}", args);

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let stdin = if args.text.is_empty() {
        read_piped_stdin()?
    } else {
        None
    };
    let input = NewInput {
        text: args.text,
        stdin,
        interactive,
    };
    let opts = NewOptions {
        title: args.title,
        tags: args.tags,
        post_type: args.post_type,
        edit: args.edit,
        dry_run: args.dry_run,
        no_publish: args.no_publish,
    };

    let written = run_new(
        &current_dir()?,
        input,
        &opts,
        &mut InquirePrompter,
        &PluginHost::new(),
        &mut io::stdout().lock(),
    )?;
    if written.is_none() && !opts.dry_run {
        warn!("No post written");
    }
    Ok(())
}

/// Execute the list command
pub fn list_command(args: ListArgs) -> Result<()> {
    debug!("Executing list command with args: {:?}", args);
    let opts = ListOptions {
        limit: args.limit,
        json: args.json,
        grep: args.grep,
        post_type: args.post_type,
    };
    run_list(&current_dir()?, &opts, &mut io::stdout().lock())?;
    Ok(())
}

/// Execute the last command
pub fn last_command(args: LastArgs) -> Result<()> {
    debug!("Executing last command with args: {:?}", args);
    let opts = LastOptions {
        edit: args.edit,
        path: args.path,
        json: args.json,
        post_type: args.post_type,
    };
    run_last(
        &current_dir()?,
        &opts,
        &PluginHost::new(),
        &mut io::stdout().lock(),
    )?;
    Ok(())
}

/// Execute the edit command
pub fn edit_command(args: EditArgs) -> Result<()> {
    debug!("Executing edit command with args: {:?}", args);
    let results = run_edit(&current_dir()?, &args.file, &PluginHost::new())?;
    debug!("{} plugins ran", results.len());
    Ok(())
}

/// Execute the doctor command. Returns whether every check passed.
pub fn doctor_command() -> Result<bool> {
    let report = run_doctor(&current_dir()?, &PluginHost::new());
    print_doctor_report(&report, &mut io::stdout().lock())?;
    Ok(report.ok)
}

//! `nanopost doctor`: project health checks

use crate::config::{read_config, resolve_post_type_config, Config, CONFIG_FILE};
use crate::error::Result;
use crate::io::editor::editor_program;
use crate::io::{find_nanopost_dir, ProjectPaths};
use crate::plugins::PluginHost;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

impl CheckStatus {
    pub fn icon(self) -> char {
        match self {
            Self::Pass => '\u{2714}',
            Self::Fail => '\u{2716}',
            Self::Warn => '\u{26A0}',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub label: String,
    pub status: CheckStatus,
    pub hint: Option<String>,
}

impl CheckResult {
    fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: CheckStatus::Pass,
            hint: None,
        }
    }

    fn fail(label: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: CheckStatus::Fail,
            hint: Some(hint.into()),
        }
    }

    fn warn(label: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            label: label.into(),
            status: CheckStatus::Warn,
            hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorReport {
    pub results: Vec<CheckResult>,
    /// False when any check failed
    pub ok: bool,
}

impl DoctorReport {
    fn new(results: Vec<CheckResult>) -> Self {
        let ok = results.iter().all(|r| r.status != CheckStatus::Fail);
        Self { results, ok }
    }
}

/// Run every check from `cwd`.
pub fn run_doctor(cwd: &Path, host: &PluginHost) -> DoctorReport {
    let mut results = Vec::new();

    let Some(nanopost_dir) = find_nanopost_dir(cwd) else {
        results.push(CheckResult::fail(
            ".nanopost directory not found",
            "Run `nanopost init` in your project root.",
        ));
        return DoctorReport::new(results);
    };
    results.push(CheckResult::pass(".nanopost directory found"));

    if let Some(config) = check_config(&nanopost_dir, &mut results) {
        if let Ok(paths) = ProjectPaths::discover(cwd) {
            check_content_dirs(&paths, &config, &mut results);
        }
        if !config.editor.trim().is_empty() {
            results.push(check_editor(&config.editor));
        }
        check_plugins(host, &nanopost_dir, &config, &mut results);
    }

    results.push(check_git());
    DoctorReport::new(results)
}

fn check_config(nanopost_dir: &Path, results: &mut Vec<CheckResult>) -> Option<Config> {
    if !nanopost_dir.join(CONFIG_FILE).exists() {
        results.push(CheckResult::fail(
            "config.json not found",
            "Run `nanopost init` to create a default config.",
        ));
        return None;
    }

    match read_config(nanopost_dir) {
        Ok(config) => {
            results.push(CheckResult::pass("config.json is valid"));
            Some(config)
        }
        Err(e) => {
            results.push(CheckResult::fail("config.json is invalid", e.to_string()));
            None
        }
    }
}

fn check_content_dirs(paths: &ProjectPaths, config: &Config, results: &mut Vec<CheckResult>) {
    for name in config.post_type_names() {
        let Ok(resolved) = resolve_post_type_config(config, name) else {
            continue;
        };
        let dir = paths.resolve(&resolved.content_dir);
        if dir.exists() {
            results.push(CheckResult::pass(format!(
                "Content directory exists ({name}): {}",
                dir.display()
            )));
        } else {
            results.push(CheckResult::warn(
                format!("Content directory missing ({name}): {}", dir.display()),
                Some("It will be created when you write your first post.".to_string()),
            ));
        }
    }
}

fn check_editor(editor: &str) -> CheckResult {
    let Some(program) = editor_program(editor) else {
        return CheckResult::warn("Editor configured but empty", None);
    };

    if which::which(&program).is_ok() {
        CheckResult::pass(format!("Editor found: {program}"))
    } else {
        CheckResult::warn(
            format!("Editor not found on PATH: {program}"),
            Some(format!("Install \"{program}\" or update editor in config.json.")),
        )
    }
}

fn check_plugins(
    host: &PluginHost,
    nanopost_dir: &Path,
    config: &Config,
    results: &mut Vec<CheckResult>,
) {
    for plugin in config.enabled_plugins() {
        let name = &plugin.name;
        match host.load_plugin(nanopost_dir, plugin) {
            Ok(_) => results.push(CheckResult::pass(format!("Plugin \"{name}\" loaded"))),
            Err(e) => results.push(CheckResult::fail(
                format!("Plugin \"{name}\" failed to load"),
                format!(
                    "{e}. Check .nanopost/plugins/{name} or install nanopost-plugin-{name}."
                ),
            )),
        }
    }
}

fn check_git() -> CheckResult {
    if which::which("git").is_ok() {
        CheckResult::pass("git available")
    } else {
        CheckResult::warn(
            "git not found",
            Some("Git is useful for version control.".to_string()),
        )
    }
}

/// Print one line per check, with an indented hint where there is one.
pub fn print_doctor_report(report: &DoctorReport, out: &mut dyn Write) -> Result<()> {
    for r in &report.results {
        writeln!(out, "{} {}", r.status.icon(), r.label)?;
        if let Some(hint) = &r.hint {
            writeln!(out, "  \u{2192} {hint}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_ok_ignores_warnings() {
        let report = DoctorReport::new(vec![
            CheckResult::pass("a"),
            CheckResult::warn("b", None),
        ]);
        assert!(report.ok);

        let report = DoctorReport::new(vec![CheckResult::pass("a"), CheckResult::fail("c", "fix")]);
        assert!(!report.ok);
    }

    #[test]
    fn test_print_report() {
        let report = DoctorReport::new(vec![
            CheckResult::pass("config.json is valid"),
            CheckResult::fail("config.json not found", "Run `nanopost init`."),
        ]);
        let mut out = Vec::new();
        print_doctor_report(&report, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\u{2714} config.json is valid\n\u{2716} config.json not found\n  \u{2192} Run `nanopost init`.\n"
        );
    }

    #[test]
    fn test_editor_check_missing_program() {
        let result = check_editor("definitely-not-an-editor-xyz --wait");
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.label.contains("definitely-not-an-editor-xyz"));
    }
}

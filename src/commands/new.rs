//! `nanopost new` and the default command

use super::{Project, Prompter};
use crate::config::{resolve_post_type_config, ResolvedPostType};
use crate::core::value::to_string_representation;
use crate::core::{
    format_date, format_date_yyyymmdd, format_filename, slugify, to_markdown, Frontmatter,
};
use crate::error::{NanopostError, Result};
use crate::io::{edit_text, write_file};
use crate::plugins::PluginHost;
use chrono::Local;
use log::{debug, info};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Title used when nothing else is available
pub const FALLBACK_TITLE: &str = "Note";

const MAX_DERIVED_TITLE: usize = 80;

/// Front matter keys filled in automatically, never prompted for
const AUTO_FIELDS: [&str; 2] = ["title", "date"];

#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    pub title: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub post_type: Option<String>,
    pub edit: bool,
    pub dry_run: bool,
    pub no_publish: bool,
}

/// Where the post body can come from
#[derive(Debug, Clone, Default)]
pub struct NewInput {
    /// Inline words from the command line
    pub text: Vec<String>,
    /// Contents of piped stdin
    pub stdin: Option<String>,
    /// Whether prompts may be shown
    pub interactive: bool,
}

impl NewInput {
    fn has_inline_or_piped(&self) -> bool {
        !self.text.is_empty() || self.stdin.as_deref().map_or(false, |s| !s.trim().is_empty())
    }
}

/// Split a comma list into trimmed, non-empty tags.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn first_sentence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?[.!?])(\s|$)").expect("static regex"))
}

/// Title derived from a post body.
///
/// Piped input uses its first non-empty line; other input its first
/// sentence, or first line. Capped at 80 characters.
pub fn derive_title(body: &str, from_pipe: bool) -> String {
    let text = body.trim();
    if text.is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    let candidate = if from_pipe {
        text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or(text)
    } else {
        match first_sentence().captures(text).and_then(|c| c.get(1)) {
            Some(m) => m.as_str(),
            None => text.lines().next().unwrap_or(text),
        }
        .trim()
    };

    candidate.chars().take(MAX_DERIVED_TITLE).collect()
}

/// File name for a new post.
///
/// `date-slug` gives `<date>-<slug>.md`. Any other format is a template over
/// `date`, `title`, `slug` and the string-valued front matter fields, with
/// `.md` appended when missing.
pub fn build_filename(
    resolved: &ResolvedPostType,
    date: &str,
    title: &str,
    frontmatter: &Frontmatter,
) -> String {
    let slug = slugify(title, resolved.max_slug_length);
    if resolved.uses_legacy_filename() {
        return format!("{date}-{slug}.md");
    }

    let mut variables: BTreeMap<String, String> = BTreeMap::from([
        ("date".to_string(), date.to_string()),
        ("title".to_string(), title.to_string()),
        ("slug".to_string(), slug),
    ]);
    for (key, value) in frontmatter {
        if let Value::String(s) = value {
            variables.insert(key.clone(), s.clone());
        }
    }

    let mut name = format_filename(&resolved.filename_format, &variables, resolved.max_slug_length);
    if !name.ends_with(".md") {
        name.push_str(".md");
    }
    name
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn choose_post_type(
    project: &Project,
    opts: &NewOptions,
    input: &NewInput,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    if let Some(name) = &opts.post_type {
        return Ok(Some(name.clone()));
    }

    let types = project.config.post_type_names();
    let default_type = project.config.default_post_type();
    if types.len() == 1 {
        return Ok(Some(types[0].to_string()));
    }

    if input.interactive && !input.has_inline_or_piped() {
        let labels: Vec<String> = types
            .iter()
            .map(|t| {
                if *t == default_type {
                    format!("{t} (default)")
                } else {
                    t.to_string()
                }
            })
            .collect();
        let initial = types.iter().position(|t| *t == default_type).unwrap_or(0);
        return Ok(prompter
            .select("Select post type", &labels, initial)?
            .and_then(|i| types.get(i))
            .map(|t| t.to_string()));
    }

    Ok(Some(default_type.to_string()))
}

/// Answers gathered from interactive prompts
#[derive(Debug, Default)]
struct PromptAnswers {
    title: String,
    tags: Vec<String>,
    fields: Frontmatter,
    body: String,
}

fn prompt_for_post(
    resolved: &ResolvedPostType,
    opts: &NewOptions,
    has_title: bool,
    has_tags: bool,
    prompter: &mut dyn Prompter,
) -> Result<PromptAnswers> {
    let mut answers = PromptAnswers::default();

    if !has_title {
        answers.title = prompter
            .text("Title (optional)", "")?
            .unwrap_or_default()
            .trim()
            .to_string();
    }

    for (key, default) in &resolved.defaults {
        if AUTO_FIELDS.contains(&key.as_str()) || (key == "tags" && has_tags) {
            continue;
        }

        if key == "tags" {
            let initial = match default {
                Value::Array(items) => items
                    .iter()
                    .map(to_string_representation)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => to_string_representation(other),
            };
            let answer = prompter.text("Tags (comma-separated, optional)", &initial)?;
            answers.tags = parse_tags(answer.as_deref());
        } else {
            let message = format!("{} (optional)", capitalize(key));
            let answer = prompter.text(&message, &to_string_representation(default))?;
            let value = answer.unwrap_or_default().trim().to_string();
            if !value.is_empty() {
                answers.fields.insert(key.clone(), Value::String(value));
            }
        }
    }

    if !opts.edit {
        answers.body = prompter.text("Body", "")?.unwrap_or_default().trim().to_string();
    }

    Ok(answers)
}

/// Create a post. Returns the written path, or `None` for a dry run or a
/// cancelled type selection.
pub fn run_new(
    cwd: &Path,
    input: NewInput,
    opts: &NewOptions,
    prompter: &mut dyn Prompter,
    host: &PluginHost,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    let project = Project::open(cwd)?;

    let Some(type_name) = choose_post_type(&project, opts, &input, prompter)? else {
        info!("Post type selection cancelled");
        return Ok(None);
    };
    let resolved = resolve_post_type_config(&project.config, &type_name)?;
    debug!("Creating {} post", resolved.name);

    let mut from_pipe = false;
    let mut body = if !input.text.is_empty() {
        input.text.join(" ").trim().to_string()
    } else if let Some(piped) = input.stdin.as_deref() {
        from_pipe = true;
        piped.trim().to_string()
    } else {
        String::new()
    };

    let mut title = opts.title.as_deref().unwrap_or_default().trim().to_string();
    let mut tags = parse_tags(opts.tags.as_deref());
    let mut custom_fields = Frontmatter::new();

    if body.is_empty() && input.interactive {
        let answers = prompt_for_post(&resolved, opts, !title.is_empty(), !tags.is_empty(), prompter)?;
        if title.is_empty() {
            title = answers.title;
        }
        if tags.is_empty() {
            tags = answers.tags;
        }
        custom_fields = answers.fields;
        body = answers.body;
    }

    if opts.edit {
        body = edit_text(&body, resolved.editor.as_deref())?;
    }

    if body.is_empty() && title.is_empty() && !input.interactive {
        return Err(NanopostError::EmptyPost);
    }
    if title.is_empty() {
        title = derive_title(&body, from_pipe);
    }

    let now = Local::now();
    let file_date = format_date_yyyymmdd(&now);

    let mut frontmatter = resolved.defaults.clone();
    frontmatter.extend(custom_fields);
    frontmatter.insert("title".to_string(), Value::String(title.clone()));
    frontmatter.insert(
        "date".to_string(),
        Value::String(format_date(&now, &resolved.date_format)),
    );
    if !tags.is_empty() {
        frontmatter.insert(
            "tags".to_string(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    let file_name = build_filename(&resolved, &file_date, &title, &frontmatter);
    let markdown = to_markdown(&frontmatter, &body, resolved.schema.as_ref())?;

    if opts.dry_run {
        write!(out, "{markdown}")?;
        return Ok(None);
    }

    let out_path = project.paths.resolve(&resolved.content_dir).join(file_name);
    write_file(&out_path, &markdown)?;
    writeln!(out, "{}", out_path.display())?;
    info!("Wrote {}", out_path.display());

    if !opts.no_publish {
        project.publish(host, &out_path, &frontmatter, &body);
    }

    Ok(Some(out_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{FieldType, FrontmatterSchema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolved(format: &str) -> ResolvedPostType {
        let mut config = Config::default();
        if let Some(filename) = config
            .post_types
            .get_mut("default")
            .and_then(|t| t.filename.as_mut())
        {
            filename.format = Some(format.to_string());
        }
        resolve_post_type_config(&config, "default").unwrap()
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(Some(" rust, cli ,, notes ")), vec!["rust", "cli", "notes"]);
        assert!(parse_tags(None).is_empty());
        assert!(parse_tags(Some(" , ")).is_empty());
    }

    #[test]
    fn test_derive_title_first_sentence() {
        assert_eq!(derive_title("Hello world. More text here.", false), "Hello world.");
        assert_eq!(derive_title("No punctuation\nsecond line", false), "No punctuation");
        assert_eq!(derive_title("   ", false), "Note");
    }

    #[test]
    fn test_derive_title_piped_first_line() {
        assert_eq!(derive_title("\n\n  First line. Still first\nsecond", true), "First line. Still first");
    }

    #[test]
    fn test_derive_title_capped() {
        let long = "a".repeat(200);
        assert_eq!(derive_title(&long, false).chars().count(), 80);
    }

    #[test]
    fn test_build_filename_legacy() {
        let name = build_filename(&resolved("date-slug"), "2024-01-15", "Hello, World!", &Frontmatter::new());
        assert_eq!(name, "2024-01-15-hello-world.md");
    }

    #[test]
    fn test_build_filename_template() {
        let mut fm = Frontmatter::new();
        fm.insert("type".into(), json!("article"));
        fm.insert("title".into(), json!("My Great Post"));
        fm.insert("draft".into(), json!(true));

        let name = build_filename(&resolved("{date}-{type}-{title}"), "2024-01-15", "My Great Post", &fm);
        assert_eq!(name, "2024-01-15-article-my-great-post.md");

        let name = build_filename(&resolved("{slug}.md"), "2024-01-15", "Déjà Vu", &fm);
        assert_eq!(name, "deja-vu.md");

        let name = build_filename(&resolved("{draft}-{slug}"), "2024-01-15", "x", &fm);
        assert_eq!(name, "{draft}-x.md");
    }

    #[test]
    fn test_build_filename_front_matter_overrides_variables() {
        let mut fm = Frontmatter::new();
        fm.insert("title".into(), json!("From Front Matter"));

        let name = build_filename(&resolved("{title}"), "2024-01-15", "From Argument", &fm);
        assert_eq!(name, "from-front-matter.md");

        let name = build_filename(&resolved("{slug}"), "2024-01-15", "From Argument", &fm);
        assert_eq!(name, "from-argument.md");
    }

    #[test]
    fn test_build_filename_front_matter_date_wins() {
        let mut fm = Frontmatter::new();
        fm.insert("date".into(), json!("2024-01-15T10:30"));
        let name = build_filename(&resolved("{date}-{slug}"), "2024-01-15", "Hi", &fm);
        assert_eq!(name, "2024-01-15T10:30-hi.md");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("status"), "Status");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_schema_types_survive_into_markdown() {
        let schema = FrontmatterSchema::Typed(BTreeMap::from([("draft".to_string(), FieldType::Boolean)]));
        let mut fm = Frontmatter::new();
        fm.insert("draft".into(), json!("yes"));
        let md = to_markdown(&fm, "", Some(&schema)).unwrap();
        assert!(md.contains("draft: true"));
    }
}

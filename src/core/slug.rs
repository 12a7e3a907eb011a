//! Slug generation and filename templating

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Default upper bound on slug length in characters
pub const DEFAULT_MAX_SLUG_LENGTH: usize = 60;

/// Slug used when the input has no usable characters
pub const FALLBACK_SLUG: &str = "note";

fn non_alphanumeric_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Turn arbitrary text into a lowercase, hyphen-separated ASCII token.
///
/// Diacritics are removed by decomposing and dropping combining marks, every
/// run of characters outside `[a-z0-9]` becomes a single `-`, and the result
/// is cut to `max_len` characters without leaving a dangling hyphen. Input
/// with nothing usable yields [`FALLBACK_SLUG`].
pub fn slugify(input: &str, max_len: usize) -> String {
    let folded: String = input
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let hyphenated = non_alphanumeric_runs().replace_all(&folded, "-");
    let trimmed = hyphenated.trim_matches('-');

    // only ASCII survives the regex, so chars == bytes here
    let cut = &trimmed[..trimmed.len().min(max_len)];
    let slug = cut.trim_end_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Expand `{key}` placeholders in a filename template.
///
/// Every occurrence of a placeholder whose key is in `variables` is replaced.
/// Values for `title` and `slug` are slugified with `max_slug_length` first;
/// everything else is inserted verbatim. Unknown placeholders are kept.
pub fn format_filename<I, K, V>(template: &str, variables: I, max_slug_length: usize) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = template.to_string();
    for (key, value) in variables {
        let key = key.as_ref();
        let placeholder = format!("{{{key}}}");
        if !out.contains(&placeholder) {
            continue;
        }
        let replacement = match key {
            "title" | "slug" => slugify(value.as_ref(), max_slug_length),
            _ => value.as_ref().to_string(),
        };
        out = out.replace(&placeholder, &replacement);
    }
    out
}

//! Token-based date formatting

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

/// Default frontmatter date pattern
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Format the calendar date as `YYYY-MM-DD` in the date's own time zone.
pub fn format_date_yyyymmdd<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Format a date with a pattern string.
///
/// Supported tokens: `yyyy`, `MM`, `dd`, `HH`, `mm`, `ss`, and the offset
/// tokens `xxx` (`+01:00`), `xx` (`+0100`) and `x` (`+1`, or the `xx` form
/// when the offset has minutes). Each token is substituted once, first
/// occurrence only. Longer offset tokens are tried before shorter ones, and
/// `mm` goes last so it cannot collide with `MM`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String {
    let offset_secs = date.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { '+' } else { '-' };
    let abs_minutes = offset_secs.unsigned_abs() / 60;
    let off_h = abs_minutes / 60;
    let off_m = abs_minutes % 60;

    let xxx = format!("{sign}{off_h:02}:{off_m:02}");
    let xx = format!("{sign}{off_h:02}{off_m:02}");
    let x = if off_m == 0 {
        format!("{sign}{off_h}")
    } else {
        xx.clone()
    };

    let tokens = [
        ("yyyy", format!("{:04}", date.year())),
        ("MM", format!("{:02}", date.month())),
        ("dd", format!("{:02}", date.day())),
        ("HH", format!("{:02}", date.hour())),
        ("xxx", xxx),
        ("xx", xx),
        ("x", x),
        ("ss", format!("{:02}", date.second())),
        ("mm", format!("{:02}", date.minute())),
    ];

    tokens
        .iter()
        .fold(format.to_string(), |acc, (token, value)| {
            acc.replacen(token, value, 1)
        })
}

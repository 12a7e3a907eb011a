pub mod front_matter;
pub mod post;
pub mod slug;
pub mod time;
pub mod value;

pub use front_matter::{
    normalize_frontmatter, parse_frontmatter, parse_frontmatter_from, to_markdown, Frontmatter,
    FrontmatterSchema, ParsedDocument,
};
pub use post::Post;
pub use slug::{format_filename, slugify, DEFAULT_MAX_SLUG_LENGTH};
pub use time::{format_date, format_date_yyyymmdd, DEFAULT_DATE_FORMAT};
pub use value::{merge_json_values, FieldType};

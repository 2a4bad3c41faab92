//! Owned HTML document model used by the parsing pipeline.

mod style;
mod tag;

pub use style::StyleMetrics;
pub use tag::{parse_root_tags, HtmlTag};

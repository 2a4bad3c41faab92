//! Rendering of parsed filings to JSON records and text output.

mod json;
mod outline;

pub use json::{to_json, tree_to_json, ElementRecord, JsonFormat, TreeRecord};
pub use outline::to_outline;

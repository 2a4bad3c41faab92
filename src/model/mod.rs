//! Semantic model types produced by the parsing pipeline.
//!
//! The model is a closed set of element kinds with exhaustive matching in
//! every consuming step, plus the static section catalogs the section
//! manager walks through.

mod element;
mod log;
mod section;
mod style;

pub use element::{Derivation, ElementKind, SemanticElement};
pub use log::{LogEntry, ProcessingLog};
pub use section::{FilingType, TopSection, INVALID_SECTION, SECTIONS_10K, SECTIONS_10Q};
pub use style::{TextStyle, BOLD_THRESHOLD, PERCENTAGE_THRESHOLD};

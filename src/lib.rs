//! # unfiling
//!
//! SEC filing HTML parsing for Rust.
//!
//! This library parses the HTML body of a 10-Q or 10-K filing into a flat
//! sequence of typed semantic elements (section titles, headings, tables,
//! running text, page artifacts) and nests that sequence into a document
//! tree. Classification runs as a chain of passes over the sequence, and
//! every reclassification is recorded in a provenance log on the element.
//!
//! ## Quick Start
//!
//! ```
//! use unfiling::{Unfiling, ElementKind, JsonFormat};
//!
//! fn main() -> unfiling::Result<()> {
//!     let html = r#"
//!         <p>FORM 10-Q</p>
//!         <p style="font-weight:bold">PART I. FINANCIAL INFORMATION</p>
//!         <p style="font-weight:bold">Item 1. Financial Statements</p>
//!         <p>Net revenue for the quarter was $12.3 million.</p>
//!     "#;
//!
//!     let result = Unfiling::new().parse_str(html)?;
//!     for element in result.elements() {
//!         println!("{}: {}", element.kind().name(), element.text());
//!     }
//!
//!     let json = result.to_json(JsonFormat::Pretty)?;
//!     assert!(json.contains("top_section_title"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed elements**: section titles, leveled headings, tables, text,
//!   page headers/numbers, images, page breaks
//! - **Section catalogs**: canonical part/item structure for 10-Q and 10-K
//! - **Document tree**: titles and sections scope the elements below them
//! - **Provenance**: each element logs every step that touched it
//! - **Filing-type detection**: 10-Q vs 10-K sniffed from the cover page

pub mod detect;
pub mod error;
pub mod html;
pub mod model;
pub mod parser;
pub mod render;
pub mod tree;

pub use detect::detect_filing_type;
pub use error::{Error, Result};
pub use model::{
    Derivation, ElementKind, FilingType, LogEntry, ProcessingLog, SemanticElement, TextStyle,
    TopSection, SECTIONS_10K, SECTIONS_10Q,
};
pub use parser::{FilingParser, ParseOptions, ProcessingContext, ProcessingStep};
pub use render::{ElementRecord, JsonFormat, TreeRecord};
pub use tree::{SemanticTree, TreeNode};

use std::path::Path;

/// Filing form to parse as: explicit option first, then content detection,
/// then the quarterly form as the fallback.
fn resolve_filing_type(html: &str, options: &ParseOptions) -> FilingType {
    options
        .filing_type
        .or_else(|| detect_filing_type(html))
        .unwrap_or(FilingType::TenQ)
}

/// Parse filing HTML into classified semantic elements.
///
/// The filing form is detected from the document content; pass explicit
/// options to force one.
///
/// # Arguments
///
/// * `html` - The filing document as an HTML string
///
/// # Returns
///
/// A `Result` containing the classified elements in document order.
///
/// # Example
///
/// ```
/// use unfiling::parse_str;
///
/// let elements = parse_str("<p>PART I</p><p>Quarterly revenue grew.</p>").unwrap();
/// assert_eq!(elements.len(), 2);
/// ```
pub fn parse_str(html: &str) -> Result<Vec<SemanticElement>> {
    parse_str_with_options(html, ParseOptions::default())
}

/// Parse filing HTML with custom options.
///
/// # Arguments
///
/// * `html` - The filing document as an HTML string
/// * `options` - Parsing options
///
/// # Example
///
/// ```
/// use unfiling::{parse_str_with_options, FilingType, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_filing_type(FilingType::TenK)
///     .with_premerge(false);
/// let elements = parse_str_with_options("<p>ITEM 1. Business</p>", options).unwrap();
/// assert_eq!(elements.len(), 1);
/// ```
pub fn parse_str_with_options(html: &str, options: ParseOptions) -> Result<Vec<SemanticElement>> {
    let filing_type = resolve_filing_type(html, &options);
    FilingParser::with_options(filing_type, options).parse(html)
}

/// Parse a filing HTML file from disk.
///
/// # Arguments
///
/// * `path` - Path to the HTML file
///
/// # Example
///
/// ```no_run
/// use unfiling::parse_file;
///
/// let elements = parse_file("filing.htm").unwrap();
/// println!("{} elements", elements.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<SemanticElement>> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a filing HTML file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Vec<SemanticElement>> {
    let html = std::fs::read_to_string(path)?;
    parse_str_with_options(&html, options)
}

/// Builder-style API for common workflows.
///
/// # Example
///
/// ```no_run
/// use unfiling::{FilingType, JsonFormat, Unfiling};
///
/// let result = Unfiling::new()
///     .with_filing_type(FilingType::TenQ)
///     .parse_file("10q.htm")
///     .unwrap();
///
/// let outline = result.to_outline();
/// let json = result.tree_to_json(JsonFormat::Compact).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Unfiling {
    options: ParseOptions,
}

impl Unfiling {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Force the filing form instead of detecting it.
    pub fn with_filing_type(mut self, filing_type: FilingType) -> Self {
        self.options = self.options.with_filing_type(filing_type);
        self
    }

    /// Enable or disable the inline-run pre-merger.
    pub fn with_premerge(mut self, premerge: bool) -> Self {
        self.options = self.options.with_premerge(premerge);
        self
    }

    /// Parse filing HTML.
    pub fn parse_str(&self, html: &str) -> Result<UnfilingResult> {
        let filing_type = resolve_filing_type(html, &self.options);
        let elements = FilingParser::with_options(filing_type, self.options.clone()).parse(html)?;
        Ok(UnfilingResult {
            filing_type,
            elements,
        })
    }

    /// Parse a filing HTML file from disk.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<UnfilingResult> {
        let html = std::fs::read_to_string(path)?;
        self.parse_str(&html)
    }
}

impl Default for Unfiling {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a parse, with conversion methods.
pub struct UnfilingResult {
    filing_type: FilingType,
    elements: Vec<SemanticElement>,
}

impl UnfilingResult {
    /// The filing form the document was parsed as.
    pub fn filing_type(&self) -> FilingType {
        self.filing_type
    }

    /// The classified elements in document order.
    pub fn elements(&self) -> &[SemanticElement] {
        &self.elements
    }

    /// Consume the result, returning the elements.
    pub fn into_elements(self) -> Vec<SemanticElement> {
        self.elements
    }

    /// Nest the elements into a document tree.
    pub fn tree(&self) -> SemanticTree {
        SemanticTree::build(self.elements.clone())
    }

    /// Render the flat element sequence as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.elements, format)
    }

    /// Render the document tree as JSON.
    pub fn tree_to_json(&self, format: JsonFormat) -> Result<String> {
        render::tree_to_json(&self.tree(), format)
    }

    /// Render an indented text outline of the section and title structure.
    pub fn to_outline(&self) -> String {
        render::to_outline(&self.tree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_10Q: &str = r#"
        <html><body>
        <p>UNITED STATES SECURITIES AND EXCHANGE COMMISSION</p>
        <p>FORM 10-Q</p>
        <p style="font-weight:bold;text-align:center">PART I - FINANCIAL INFORMATION</p>
        <p style="font-weight:bold">Item 1. Financial Statements</p>
        <p>Net revenue for the quarter was $12.3 million.</p>
        <hr>
        <p style="font-weight:bold">Item 2. Management's Discussion and Analysis</p>
        <p>Results of operations are discussed below.</p>
        </body></html>
    "#;

    fn kind_names(elements: &[SemanticElement]) -> Vec<&'static str> {
        elements.iter().map(|e| e.kind().name()).collect()
    }

    // ==================== Free Function Tests ====================

    #[test]
    fn test_parse_str_classifies_a_small_filing() {
        let elements = parse_str(SAMPLE_10Q).unwrap();
        assert_eq!(
            kind_names(&elements),
            vec![
                "irrelevant",
                "irrelevant",
                "top_section_title",
                "top_section_title",
                "text",
                "page_break",
                "top_section_title",
                "text",
            ]
        );
    }

    #[test]
    fn test_parse_str_assigns_catalog_sections() {
        let elements = parse_str(SAMPLE_10Q).unwrap();
        let sections: Vec<&str> = elements
            .iter()
            .filter_map(|e| match e.kind() {
                ElementKind::TopSectionTitle { section } => Some(section.identifier),
                _ => None,
            })
            .collect();
        assert_eq!(sections, vec!["part1", "part1item1", "part1item2"]);
    }

    #[test]
    fn test_explicit_filing_type_skips_detection() {
        let options = ParseOptions::new().with_filing_type(FilingType::TenK);
        let elements =
            parse_str_with_options("<p>ITEM 1. Business</p><p>We make widgets.</p>", options)
                .unwrap();
        match elements[0].kind() {
            ElementKind::TopSectionTitle { section } => {
                assert_eq!(section.identifier, "part1item1");
            }
            other => panic!("expected a section title, got {}", other.name()),
        }
    }

    #[test]
    fn test_parse_file_missing_path_is_io_error() {
        let result = parse_file("/nonexistent/filing.htm");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    // ==================== Builder Tests ====================

    #[test]
    fn test_builder_detects_quarterly_form() {
        let result = Unfiling::new().parse_str(SAMPLE_10Q).unwrap();
        assert_eq!(result.filing_type(), FilingType::TenQ);
        assert!(!result.elements().is_empty());
    }

    #[test]
    fn test_builder_filing_type_overrides_detection() {
        let result = Unfiling::new()
            .with_filing_type(FilingType::TenK)
            .parse_str(SAMPLE_10Q)
            .unwrap();
        assert_eq!(result.filing_type(), FilingType::TenK);
    }

    #[test]
    fn test_undetectable_form_defaults_to_quarterly() {
        let result = Unfiling::new().parse_str("<p>PART I</p>").unwrap();
        assert_eq!(result.filing_type(), FilingType::TenQ);
    }

    #[test]
    fn test_builder_premerge_toggle() {
        let html = "<div>\
             <span style=\"font-weight:bold\">CONDENSED </span>\
             <span style=\"font-weight:bold\">BALANCE SHEETS</span>\
             </div>";
        let merged = Unfiling::new().parse_str(html).unwrap();
        assert_eq!(kind_names(merged.elements()), vec!["pre_merged_text"]);

        let unmerged = Unfiling::new()
            .with_premerge(false)
            .parse_str(html)
            .unwrap();
        assert_ne!(kind_names(unmerged.elements()), vec!["pre_merged_text"]);
    }

    // ==================== Result Tests ====================

    #[test]
    fn test_result_tree_scopes_items_under_parts() {
        let result = Unfiling::new().parse_str(SAMPLE_10Q).unwrap();
        let tree = result.tree();
        assert_eq!(tree.roots.len(), 3);
        let part = &tree.roots[2];
        match part.element.kind() {
            ElementKind::TopSectionTitle { section } => {
                assert_eq!(section.identifier, "part1")
            }
            other => panic!("expected the part title as a root, got {}", other.name()),
        }
        assert_eq!(part.children.len(), 2);
    }

    #[test]
    fn test_result_outline_lists_section_titles() {
        let result = Unfiling::new().parse_str(SAMPLE_10Q).unwrap();
        let outline = result.to_outline();
        assert!(outline.contains("PART I - FINANCIAL INFORMATION"));
        assert!(outline.contains("  Item 1. Financial Statements"));
    }

    #[test]
    fn test_result_json_output_is_valid() {
        let result = Unfiling::new().parse_str(SAMPLE_10Q).unwrap();
        let json = result.to_json(JsonFormat::Compact).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().is_some());

        let tree_json = result.tree_to_json(JsonFormat::Pretty).unwrap();
        assert!(tree_json.contains("\"nested\""));
    }
}

//! Semantic element model.
//!
//! Elements are immutable values: a classification step never edits an
//! element in place, it builds a replacement that carries the predecessor's
//! provenance log plus one new entry. Later pipeline stages only ever hold
//! the newest value of each slot.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::html::HtmlTag;
use crate::model::log::ProcessingLog;
use crate::model::section::TopSection;
use crate::model::style::TextStyle;

/// How a synthesized element relates to the element it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Produced by collapsing uniformly styled inline runs into one node
    PreMerge,
    /// Produced by splitting a node with independently meaningful children
    CompositeSplit,
}

/// Classification of one unit of document content.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Initial state, no classifier has matched yet
    NotYetClassified,
    /// Regular prose
    Text,
    /// Heading with a hierarchical level, 1 is the most significant
    Title { level: u32 },
    /// Text whose styling sets it apart from regular prose
    HighlightedText {
        style: TextStyle,
        is_continuation: bool,
    },
    /// Horizontal rule separating rendered pages
    PageBreak,
    /// Repeated header line at the top of rendered pages
    PageHeader,
    /// Page numbering artifact
    PageNumber,
    Image,
    Table,
    TableOfContents,
    /// A node split into independently meaningful children
    Composite { children: Vec<SemanticElement> },
    /// Low-information trailing content such as signature blocks
    SupplementaryText,
    /// Result of collapsing uniformly styled inline runs
    PreMergedText,
    /// No textual content
    Empty,
    /// Content excluded from the document structure
    Irrelevant,
    /// Title opening one of the canonical filing sections
    TopSectionTitle { section: TopSection },
}

impl ElementKind {
    /// Snake-case variant name used in serialized records and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::NotYetClassified => "not_yet_classified",
            ElementKind::Text => "text",
            ElementKind::Title { .. } => "title",
            ElementKind::HighlightedText { .. } => "highlighted_text",
            ElementKind::PageBreak => "page_break",
            ElementKind::PageHeader => "page_header",
            ElementKind::PageNumber => "page_number",
            ElementKind::Image => "image",
            ElementKind::Table => "table",
            ElementKind::TableOfContents => "table_of_contents",
            ElementKind::Composite { .. } => "composite",
            ElementKind::SupplementaryText => "supplementary_text",
            ElementKind::PreMergedText => "pre_merged_text",
            ElementKind::Empty => "empty",
            ElementKind::Irrelevant => "irrelevant",
            ElementKind::TopSectionTitle { .. } => "top_section_title",
        }
    }
}

/// One classified unit of document content.
///
/// Owns its backing HTML node and its provenance log.
#[derive(Debug, Clone)]
pub struct SemanticElement {
    tag: HtmlTag,
    log: ProcessingLog,
    derived: Option<Derivation>,
    kind: ElementKind,
}

impl SemanticElement {
    /// Freshly extracted element awaiting classification.
    pub fn not_yet_classified(tag: HtmlTag) -> Self {
        Self {
            tag,
            log: ProcessingLog::new(),
            derived: None,
            kind: ElementKind::NotYetClassified,
        }
    }

    /// Element created directly with a known kind.
    pub fn new(tag: HtmlTag, kind: ElementKind) -> Self {
        Self {
            tag,
            log: ProcessingLog::new(),
            derived: None,
            kind,
        }
    }

    /// Synthesized replacement for `predecessor`, backed by a different
    /// node. Carries the predecessor's log forward and records the
    /// derivation.
    pub fn derive_from(
        predecessor: &SemanticElement,
        tag: HtmlTag,
        kind: ElementKind,
        derivation: Derivation,
        origin: &str,
    ) -> Self {
        let note = match derivation {
            Derivation::PreMerge => "derived by pre-merge",
            Derivation::CompositeSplit => "derived by composite split",
        };
        let mut log = predecessor.log.clone();
        log.record(origin, note);
        Self {
            tag,
            log,
            derived: Some(derivation),
            kind,
        }
    }

    pub fn tag(&self) -> &HtmlTag {
        &self.tag
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn log(&self) -> &ProcessingLog {
        &self.log
    }

    pub fn derivation(&self) -> Option<Derivation> {
        self.derived
    }

    /// Normalized text of the backing node.
    pub fn text(&self) -> &str {
        self.tag.text()
    }

    /// Children of a composite element, `None` for all other kinds.
    pub fn composite_children(&self) -> Option<&[SemanticElement]> {
        match &self.kind {
            ElementKind::Composite { children } => Some(children),
            _ => None,
        }
    }

    /// Append a log note without changing the classification.
    pub fn with_note(mut self, origin: &str, message: impl Into<String>) -> Self {
        self.log.record(origin, message);
        self
    }

    /// Replacement element with a new kind, same tag, and the
    /// predecessor's log plus one entry.
    pub fn reclassified(self, kind: ElementKind, origin: &str) -> Self {
        let mut log = self.log;
        log.record(origin, format!("classified as {}", kind.name()));
        Self {
            tag: self.tag,
            log,
            derived: self.derived,
            kind,
        }
    }

    /// Reclassify as highlighted text. A style with no facets set cannot
    /// highlight anything, so it is rejected as a construction error.
    pub fn into_highlighted(
        self,
        style: TextStyle,
        is_continuation: bool,
        origin: &str,
    ) -> Result<Self> {
        if style.is_empty() {
            return Err(Error::construction(
                "highlighted text requires at least one style facet",
            ));
        }
        Ok(self.reclassified(
            ElementKind::HighlightedText {
                style,
                is_continuation,
            },
            origin,
        ))
    }

    /// Reclassify as a composite wrapping the given children. A composite
    /// with no children is rejected as a construction error.
    pub fn into_composite(self, children: Vec<SemanticElement>, origin: &str) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::construction("composite element has no children"));
        }
        Ok(self.reclassified(ElementKind::Composite { children }, origin))
    }

    /// Apply `f` to each child of a composite element, in order. Any other
    /// kind passes through unchanged.
    pub(crate) fn map_children(
        self,
        f: &mut dyn FnMut(usize, SemanticElement) -> Result<SemanticElement>,
    ) -> Result<Self> {
        match self.kind {
            ElementKind::Composite { children } => {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| f(index, child))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self {
                    kind: ElementKind::Composite { children },
                    ..self
                })
            }
            _ => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_root_tags;

    fn text_tag(html: &str) -> HtmlTag {
        parse_root_tags(html)
            .into_iter()
            .next()
            .expect("document has a root tag")
    }

    #[test]
    fn test_reclassify_preserves_log_prefix() {
        let element = SemanticElement::not_yet_classified(text_tag("<body><p>x</p></body>"))
            .with_note("StepA", "seen");
        let before = element.log().len();
        let reclassified = element.reclassified(ElementKind::Text, "StepB");
        assert_eq!(reclassified.log().len(), before + 1);
        assert_eq!(reclassified.log().entries()[0].origin, "StepA");
        assert_eq!(reclassified.log().entries()[1].origin, "StepB");
        assert!(matches!(reclassified.kind(), ElementKind::Text));
    }

    #[test]
    fn test_derive_from_carries_log() {
        let original = SemanticElement::not_yet_classified(text_tag("<body><p>ab</p></body>"))
            .with_note("StepA", "seen");
        let merged = SemanticElement::derive_from(
            &original,
            text_tag("<body><p>ab</p></body>"),
            ElementKind::PreMergedText,
            Derivation::PreMerge,
            "StepB",
        );
        assert_eq!(merged.derivation(), Some(Derivation::PreMerge));
        assert_eq!(merged.log().entries()[0].origin, "StepA");
        assert_eq!(merged.log().len(), original.log().len() + 1);
    }

    #[test]
    fn test_highlighted_rejects_empty_style() {
        let element = SemanticElement::not_yet_classified(text_tag("<body><p>x</p></body>"));
        let result = element.into_highlighted(TextStyle::default(), false, "Step");
        assert!(matches!(
            result,
            Err(Error::ElementConstruction { .. })
        ));
    }

    #[test]
    fn test_composite_rejects_empty_children() {
        let element = SemanticElement::not_yet_classified(text_tag("<body><div></div></body>"));
        let result = element.into_composite(vec![], "Step");
        assert!(matches!(result, Err(Error::ElementConstruction { .. })));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ElementKind::NotYetClassified.name(), "not_yet_classified");
        assert_eq!(ElementKind::Title { level: 1 }.name(), "title");
        assert_eq!(
            ElementKind::Composite { children: vec![] }.name(),
            "composite"
        );
    }

    #[test]
    fn test_map_children_only_touches_composites() {
        let child = SemanticElement::not_yet_classified(text_tag("<body><p>a</p></body>"));
        let composite = SemanticElement::new(
            text_tag("<body><div><p>a</p></div></body>"),
            ElementKind::Composite {
                children: vec![child],
            },
        );
        let mapped = composite
            .map_children(&mut |_, c| Ok(c.reclassified(ElementKind::Text, "Step")))
            .unwrap();
        let children = mapped.composite_children().unwrap();
        assert!(matches!(children[0].kind(), ElementKind::Text));

        let plain = SemanticElement::not_yet_classified(text_tag("<body><p>b</p></body>"));
        let unchanged = plain
            .map_children(&mut |_, c| Ok(c.reclassified(ElementKind::Text, "Step")))
            .unwrap();
        assert!(matches!(unchanged.kind(), ElementKind::NotYetClassified));
    }
}

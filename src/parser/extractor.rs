//! Initial element extraction.
//!
//! Each top-level tag becomes one element, unless a single-element check
//! decides the node bundles several independently meaningful children, in
//! which case it is split into a composite whose children go through the
//! same extraction recursively.

use crate::error::Result;
use crate::html::HtmlTag;
use crate::model::{Derivation, ElementKind, SemanticElement};
use crate::parser::sections::SectionPatterns;

const STEP_NAME: &str = "ElementExtractor";

/// Verdict on whether a node, taken as one unit, represents a single
/// semantic element. `None` defers to the next check.
pub trait SingleElementCheck {
    fn contains_single_element(&self, element: &SemanticElement) -> Option<bool>;
}

/// An image is always one unit, however deep it sits.
struct ImageCheck;

impl SingleElementCheck for ImageCheck {
    fn contains_single_element(&self, element: &SemanticElement) -> Option<bool> {
        if element.tag().contains_tag("img", true) {
            return Some(true);
        }
        None
    }
}

/// A table must never be cut apart.
struct TableCheck;

impl SingleElementCheck for TableCheck {
    fn contains_single_element(&self, element: &SemanticElement) -> Option<bool> {
        if element.tag().contains_tag("table", true) {
            return Some(true);
        }
        None
    }
}

/// A node holding a section-title text among other content must be split
/// so the title can be classified on its own. Link text is ignored, table
/// of contents entries repeat the section names.
struct TopSectionTitleCheck {
    patterns: SectionPatterns,
}

impl SingleElementCheck for TopSectionTitleCheck {
    fn contains_single_element(&self, element: &SemanticElement) -> Option<bool> {
        let matches = element
            .tag()
            .count_text_matches_in_descendants(|text| self.patterns.is_part_or_item(text), true);
        if matches >= 1 {
            return Some(false);
        }
        None
    }
}

/// Turns top-level document tags into the initial element sequence.
pub struct ElementExtractor {
    checks: Vec<Box<dyn SingleElementCheck>>,
}

impl ElementExtractor {
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(ImageCheck),
                Box::new(TableCheck),
                Box::new(TopSectionTitleCheck {
                    patterns: SectionPatterns::new(),
                }),
            ],
        }
    }

    /// Produce the initial ordered element sequence, one element per tag,
    /// with split nodes wrapped as composites.
    pub fn extract(&self, tags: Vec<HtmlTag>) -> Result<Vec<SemanticElement>> {
        tags.into_iter()
            .map(|tag| self.extract_element(SemanticElement::not_yet_classified(tag)))
            .collect()
    }

    fn extract_element(&self, element: SemanticElement) -> Result<SemanticElement> {
        if self.contains_single_element(&element) {
            return Ok(element);
        }
        let child_tags = element.tag().children();
        if child_tags.is_empty() {
            return Ok(element);
        }
        let children = child_tags
            .into_iter()
            .map(|tag| {
                let child = SemanticElement::derive_from(
                    &element,
                    tag,
                    ElementKind::NotYetClassified,
                    Derivation::CompositeSplit,
                    STEP_NAME,
                );
                self.extract_element(child)
            })
            .collect::<Result<Vec<_>>>()?;
        element.into_composite(children, STEP_NAME)
    }

    /// First check with a verdict wins; all checks indeterminate means the
    /// node is a single element.
    fn contains_single_element(&self, element: &SemanticElement) -> bool {
        for check in &self.checks {
            if let Some(verdict) = check.contains_single_element(element) {
                return verdict;
            }
        }
        true
    }
}

impl Default for ElementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

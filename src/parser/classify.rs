//! Single-purpose classifiers of the pipeline chain.
//!
//! Every classifier here either matches and returns a replacement element
//! or passes the input through untouched. Absence of a match is never an
//! error.

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{ElementKind, SemanticElement, TextStyle};
use crate::parser::context::ProcessingContext;
use crate::parser::engine::ProcessingStep;

/// A node with no textual content and an image inside is the image itself.
pub struct ImageClassifier;

impl ImageClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for ImageClassifier {
    fn name(&self) -> &'static str {
        "ImageClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        if element.tag().contains_tag("img", true) && !element.tag().contains_words() {
            return Ok(element.reclassified(ElementKind::Image, self.name()));
        }
        Ok(element)
    }
}

/// Horizontal rules separate rendered pages.
pub struct PageBreakClassifier;

impl PageBreakClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PageBreakClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for PageBreakClassifier {
    fn name(&self) -> &'static str {
        "PageBreakClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        let tag = element.tag();
        if tag.name() == "hr" || (!tag.contains_words() && tag.contains_tag("hr", false)) {
            return Ok(element.reclassified(ElementKind::PageBreak, self.name()));
        }
        Ok(element)
    }
}

/// Nodes without words or meaningful descendants carry no content.
pub struct EmptyElementClassifier;

impl EmptyElementClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmptyElementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for EmptyElementClassifier {
    fn name(&self) -> &'static str {
        "EmptyElementClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        let tag = element.tag();
        // wordless spacer tables still classify by shape, not emptiness
        if !tag.contains_words()
            && !tag.contains_tag("table", true)
            && !tag.contains_tag("img", true)
        {
            return Ok(element.reclassified(ElementKind::Empty, self.name()));
        }
        Ok(element)
    }
}

/// Presence of a tabular node makes the element a table.
pub struct TableClassifier;

impl TableClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TableClassifier {
    fn name(&self) -> &'static str {
        "TableClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        if element.tag().contains_tag("table", true) {
            return Ok(element.reclassified(ElementKind::Table, self.name()));
        }
        Ok(element)
    }
}

/// A table whose rows are mostly internal links is the table of contents.
pub struct TableOfContentsClassifier;

/// Internal anchors required before a table counts as a table of contents.
const TOC_ANCHOR_THRESHOLD: usize = 3;

impl TableOfContentsClassifier {
    pub fn new() -> Self {
        Self
    }

    fn internal_anchor_count(element: &SemanticElement) -> usize {
        element
            .tag()
            .find_tags("a")
            .iter()
            .filter(|anchor| {
                anchor
                    .attr("href")
                    .is_some_and(|href| href.starts_with('#'))
            })
            .count()
    }
}

impl Default for TableOfContentsClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TableOfContentsClassifier {
    fn name(&self) -> &'static str {
        "TableOfContentsClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::Table) {
            return Ok(element);
        }
        let anchors = Self::internal_anchor_count(&element);
        if anchors >= TOC_ANCHOR_THRESHOLD {
            debug!("table with {anchors} internal anchors is a table of contents");
            return Ok(element.reclassified(ElementKind::TableOfContents, self.name()));
        }
        Ok(element)
    }
}

/// Marks everything before the first recognized section as irrelevant
/// front matter (cover page, checkbox boilerplate).
///
/// Two passes: the first finds where the filing body starts, the second
/// reclassifies the elements before it.
pub struct IntroductorySectionClassifier {
    body_start: Option<usize>,
}

impl IntroductorySectionClassifier {
    pub fn new() -> Self {
        Self { body_start: None }
    }
}

impl Default for IntroductorySectionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for IntroductorySectionClassifier {
    fn name(&self) -> &'static str {
        "IntroductorySectionClassifier"
    }

    fn iterations(&self) -> usize {
        2
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        match ctx.iteration() {
            0 => {
                if self.body_start.is_none() {
                    if let ElementKind::TopSectionTitle { section } = element.kind() {
                        if section.order >= 0 {
                            self.body_start = Some(ctx.element_index());
                        }
                    }
                }
                Ok(element)
            }
            1 => {
                let Some(body_start) = self.body_start else {
                    return Ok(element);
                };
                if ctx.element_index() >= body_start
                    || !matches!(element.kind(), ElementKind::NotYetClassified)
                {
                    return Ok(element);
                }
                Ok(element.reclassified(ElementKind::Irrelevant, self.name()))
            }
            iteration => Err(Error::InvalidIteration { iteration }),
        }
    }
}

/// Nodes containing words default to regular prose.
pub struct TextClassifier;

impl TextClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TextClassifier {
    fn name(&self) -> &'static str {
        "TextClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        if element.tag().contains_words() {
            return Ok(element.reclassified(ElementKind::Text, self.name()));
        }
        Ok(element)
    }
}

/// Prose with a distinguishing computed style becomes highlighted text,
/// the raw material for title leveling.
pub struct HighlightedTextClassifier;

impl HighlightedTextClassifier {
    pub fn new() -> Self {
        Self
    }

    fn is_continuation(element: &SemanticElement) -> bool {
        element.tag().name() == "ix:continuation" || element.tag().attr("continued-at").is_some()
    }
}

impl Default for HighlightedTextClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for HighlightedTextClassifier {
    fn name(&self) -> &'static str {
        "HighlightedTextClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::Text) {
            return Ok(element);
        }
        let style = TextStyle::from_tag(element.tag());
        if style.is_empty() {
            return Ok(element);
        }
        let is_continuation = Self::is_continuation(&element);
        element.into_highlighted(style, is_continuation, self.name())
    }
}

/// Boilerplate that accompanies the filing body without being part of it.
pub struct SupplementaryTextClassifier {
    patterns: Vec<Regex>,
}

impl SupplementaryTextClassifier {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                Regex::new(r"(?i)^signatures?$").unwrap(),
                Regex::new(r"(?i)^pursuant to the requirements of the securities exchange act")
                    .unwrap(),
                Regex::new(r"(?i)^see accompanying notes").unwrap(),
                Regex::new(r"(?i)^table of contents$").unwrap(),
                // short fully parenthesized remarks, e.g. "(unaudited)"
                Regex::new(r"^\([^()]{1,60}\)$").unwrap(),
            ],
        }
    }
}

impl Default for SupplementaryTextClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for SupplementaryTextClassifier {
    fn name(&self) -> &'static str {
        "SupplementaryTextClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(
            element.kind(),
            ElementKind::Text | ElementKind::HighlightedText { .. }
        ) {
            return Ok(element);
        }
        if self
            .patterns
            .iter()
            .any(|pattern| pattern.is_match(element.text()))
        {
            return Ok(element.reclassified(ElementKind::SupplementaryText, self.name()));
        }
        Ok(element)
    }
}

/// Bare page numbers sitting next to a page break.
pub struct PageNumberClassifier {
    pattern: Regex,
}

/// A page number must sit within this many slots of a page break.
const PAGE_NUMBER_DISTANCE: usize = 2;

impl PageNumberClassifier {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"(?i)^[-–—]?\s*(?:page\s+)?(?:\d{1,4}|[ivxlcdm]{1,7})(?:\s+of\s+\d{1,4})?\s*[-–—]?$",
            )
            .unwrap(),
        }
    }
}

impl Default for PageNumberClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for PageNumberClassifier {
    fn name(&self) -> &'static str {
        "PageNumberClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(
            element.kind(),
            ElementKind::NotYetClassified | ElementKind::Text | ElementKind::HighlightedText { .. }
        ) {
            return Ok(element);
        }
        if !self.pattern.is_match(element.text()) {
            return Ok(element);
        }
        let near_break = ctx
            .distance_to_previous_page_break()
            .is_some_and(|distance| distance <= PAGE_NUMBER_DISTANCE)
            || ctx
                .distance_to_next_page_break()
                .is_some_and(|distance| distance <= PAGE_NUMBER_DISTANCE);
        if near_break {
            return Ok(element.reclassified(ElementKind::PageNumber, self.name()));
        }
        Ok(element)
    }
}

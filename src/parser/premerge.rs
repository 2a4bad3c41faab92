//! Inline-run pre-merging.
//!
//! EDGAR documents often split one visual line of text across many sibling
//! `<span>` runs (iXBRL tagging does this aggressively). When every run in
//! a node carries the same computed style, the node is collapsed into a
//! single synthetic child holding the whole text, so the classifiers see
//! one line instead of a pile of fragments.

use crate::error::Result;
use crate::html::HtmlTag;
use crate::model::{Derivation, ElementKind, SemanticElement, TextStyle};
use crate::parser::context::ProcessingContext;
use crate::parser::engine::ProcessingStep;

const STEP_NAME: &str = "TextPreMerger";

pub struct TextPreMerger;

impl TextPreMerger {
    pub fn new() -> Self {
        Self
    }

    /// The non-empty span runs under `tag`, or `None` when the node does
    /// not qualify for merging.
    fn mergeable_runs(tag: &HtmlTag) -> Option<Vec<HtmlTag>> {
        let children = tag.children();
        if children.len() <= 1 {
            return None;
        }
        for child in &children {
            if child.name() != "span" && !child.contains_tag("span", false) {
                return None;
            }
        }
        let runs: Vec<HtmlTag> = tag
            .find_tags("span")
            .into_iter()
            .filter(|span| !span.text().is_empty())
            .collect();
        if runs.is_empty() {
            return None;
        }
        Some(runs)
    }
}

impl Default for TextPreMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TextPreMerger {
    fn name(&self) -> &'static str {
        STEP_NAME
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(element.kind(), ElementKind::NotYetClassified) {
            return Ok(element);
        }
        if !element.tag().contains_words() || !element.tag().has_element_children() {
            return Ok(element);
        }
        let Some(runs) = Self::mergeable_runs(element.tag()) else {
            return Ok(element);
        };
        let first_style = TextStyle::from_tag(&runs[0]);
        if runs
            .iter()
            .skip(1)
            .any(|run| TextStyle::from_tag(run) != first_style)
        {
            return Ok(element);
        }
        let merged_run = runs[0].clone_with_text(element.text());
        let merged_tag = element.tag().clone_with_children(vec![merged_run]);
        Ok(SemanticElement::derive_from(
            &element,
            merged_tag,
            ElementKind::PreMergedText,
            Derivation::PreMerge,
            STEP_NAME,
        ))
    }
}

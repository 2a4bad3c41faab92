//! Pipeline engine and the filing parser entry point.
//!
//! The engine owns the traversal discipline every step relies on: elements
//! are visited exactly once per iteration, in document order, with composite
//! children visited individually in place of their container. Steps only
//! see one element at a time plus the read-only context.

use log::debug;

use crate::error::Result;
use crate::html::parse_root_tags;
use crate::model::{ElementKind, FilingType, SemanticElement};
use crate::parser::classify::{
    EmptyElementClassifier, HighlightedTextClassifier, ImageClassifier,
    IntroductorySectionClassifier, PageBreakClassifier, PageNumberClassifier,
    SupplementaryTextClassifier, TableClassifier, TableOfContentsClassifier, TextClassifier,
};
use crate::parser::context::ProcessingContext;
use crate::parser::extractor::ElementExtractor;
use crate::parser::headers::{PageHeaderClassifier, PageHeaderDistanceClassifier};
use crate::parser::options::ParseOptions;
use crate::parser::premerge::TextPreMerger;
use crate::parser::sections::TopSectionManager;
use crate::parser::titles::TitleClassifier;

/// One step of the classification pipeline.
///
/// A step consumes each element value and returns either the same value or
/// a replacement. Multi-pass steps declare their iteration count and keep
/// accumulator state in their own fields across iterations; the element
/// sequence itself is re-walked once per iteration with a fresh context.
pub trait ProcessingStep {
    /// Step name recorded in provenance logs.
    fn name(&self) -> &'static str;

    /// Number of full passes over the element sequence.
    fn iterations(&self) -> usize {
        1
    }

    /// Process one element. Composite containers are never passed here,
    /// their children are visited individually instead.
    fn process_element(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement>;
}

/// Run one step over the whole sequence, iterating as many times as the
/// step declares.
pub(crate) fn run_step(
    step: &mut dyn ProcessingStep,
    mut elements: Vec<SemanticElement>,
) -> Result<Vec<SemanticElement>> {
    for iteration in 0..step.iterations() {
        let mut ctx = ProcessingContext::new(iteration, page_break_positions(&elements));
        let mut processed = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let mut path = Vec::new();
            processed.push(process_slot(step, element, index, &mut path, &mut ctx)?);
        }
        elements = processed;
    }
    Ok(elements)
}

fn process_slot(
    step: &mut dyn ProcessingStep,
    element: SemanticElement,
    index: usize,
    path: &mut Vec<usize>,
    ctx: &mut ProcessingContext,
) -> Result<SemanticElement> {
    let element = if element.composite_children().is_some() {
        element.map_children(&mut |child_index, child| {
            path.push(child_index);
            let processed = process_slot(&mut *step, child, index, &mut *path, &mut *ctx);
            path.pop();
            processed
        })?
    } else {
        ctx.set_cursor(index, path);
        step.process_element(element, ctx)?
    };
    // keep the active section current for later elements in this walk
    if let ElementKind::TopSectionTitle { section } = element.kind() {
        ctx.set_section(*section);
    }
    Ok(element)
}

fn page_break_positions(elements: &[SemanticElement]) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, element)| matches!(element.kind(), ElementKind::PageBreak))
        .map(|(index, _)| index)
        .collect()
}

/// Parses one filing document into classified semantic elements.
///
/// Owns the ordered step chain for a filing type and runs it over the
/// extracted element sequence.
pub struct FilingParser {
    filing_type: FilingType,
    options: ParseOptions,
}

impl FilingParser {
    /// Parser with the default step chain for a filing type.
    pub fn new(filing_type: FilingType) -> Self {
        Self {
            filing_type,
            options: ParseOptions::default(),
        }
    }

    /// Parser with explicit options.
    pub fn with_options(filing_type: FilingType, options: ParseOptions) -> Self {
        Self {
            filing_type,
            options,
        }
    }

    pub fn filing_type(&self) -> FilingType {
        self.filing_type
    }

    /// Run the full pipeline over a raw HTML document.
    pub fn parse(&self, html: &str) -> Result<Vec<SemanticElement>> {
        let tags = parse_root_tags(html);
        debug!("parsed {} top-level tags", tags.len());
        let elements = ElementExtractor::new().extract(tags)?;
        debug!("extracted {} initial elements", elements.len());
        self.run_steps(elements)
    }

    fn run_steps(&self, mut elements: Vec<SemanticElement>) -> Result<Vec<SemanticElement>> {
        for mut step in self.steps() {
            elements = run_step(step.as_mut(), elements)?;
            debug!("{}: {} elements", step.name(), elements.len());
        }
        Ok(elements)
    }

    /// The default classification chain, in pipeline order.
    fn steps(&self) -> Vec<Box<dyn ProcessingStep>> {
        let mut steps: Vec<Box<dyn ProcessingStep>> = Vec::new();
        if self.options.premerge {
            steps.push(Box::new(TextPreMerger::new()));
        }
        steps.push(Box::new(ImageClassifier::new()));
        steps.push(Box::new(PageBreakClassifier::new()));
        steps.push(Box::new(EmptyElementClassifier::new()));
        steps.push(Box::new(TableClassifier::new()));
        steps.push(Box::new(TableOfContentsClassifier::new()));
        steps.push(Box::new(TopSectionManager::new(self.filing_type)));
        steps.push(Box::new(IntroductorySectionClassifier::new()));
        steps.push(Box::new(TextClassifier::new()));
        steps.push(Box::new(HighlightedTextClassifier::new()));
        steps.push(Box::new(SupplementaryTextClassifier::new()));
        steps.push(Box::new(PageHeaderClassifier::new()));
        steps.push(Box::new(PageHeaderDistanceClassifier::new()));
        steps.push(Box::new(PageNumberClassifier::new()));
        steps.push(Box::new(TitleClassifier::new()));
        steps
    }
}

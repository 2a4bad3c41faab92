//! Repeated-content detection for page headers.
//!
//! Filings repeat a short banner at the top of every rendered page. Two
//! passes over the whole sequence find them: the first collects candidates
//! and their occurrence counts, the second reclassifies the elements whose
//! candidate cleared the thresholds. Candidates are remembered by slot
//! position, which is stable between the two passes.

use std::collections::HashMap;

use log::trace;

use crate::error::{Error, Result};
use crate::model::{ElementKind, SemanticElement, TextStyle};
use crate::parser::context::{ElementPath, ProcessingContext};
use crate::parser::engine::ProcessingStep;

/// Longest text that can still be a page header.
const HEADER_TEXT_LIMIT: usize = 100;

/// Occurrences required before a candidate is accepted.
const HEADER_REPEAT_THRESHOLD: usize = 5;

/// How far behind a page break a header may sit.
const BREAK_DISTANCE_LIMIT: usize = 5;

/// Only this many of the most frequent by-distance candidates are kept.
const RANKED_CANDIDATE_LIMIT: usize = 5;

/// Share of pages a by-distance candidate must appear on.
const PAGE_COVERAGE_RATIO: f64 = 0.7;

/// Finds headers by exact repetition: the same short text (and, for
/// highlighted elements, the same style) appearing over and over.
pub struct PageHeaderClassifier {
    candidates: HashMap<ElementPath, TextCandidate>,
    counts: HashMap<TextCandidate, usize>,
    retained: Option<HashMap<TextCandidate, usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextCandidate {
    text: String,
    style: Option<TextStyle>,
}

impl PageHeaderClassifier {
    pub fn new() -> Self {
        Self {
            candidates: HashMap::new(),
            counts: HashMap::new(),
            retained: None,
        }
    }

    fn collect(&mut self, element: &SemanticElement, ctx: &ProcessingContext) {
        if element.text().chars().count() > HEADER_TEXT_LIMIT {
            return;
        }
        let style = match element.kind() {
            ElementKind::HighlightedText { style, .. } => Some(*style),
            _ => None,
        };
        let candidate = TextCandidate {
            text: element.text().to_string(),
            style,
        };
        self.candidates.insert(ctx.element_path(), candidate.clone());
        let count = self.counts.entry(candidate).or_insert(0);
        *count += 1;
        trace!("header candidate {:?} counted {count} times", element.text());
    }

    fn classify(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if self.retained.is_none() {
            let retained = self
                .counts
                .iter()
                .filter(|(_, &count)| count >= HEADER_REPEAT_THRESHOLD)
                .map(|(candidate, &count)| (candidate.clone(), count))
                .collect();
            self.retained = Some(retained);
        }
        let retained = match self.retained.as_ref() {
            Some(retained) if !retained.is_empty() => retained,
            _ => return Ok(element),
        };
        let Some(candidate) = self.candidates.get(&ctx.element_path()) else {
            return Ok(element);
        };
        let Some(count) = retained.get(candidate) else {
            return Ok(element);
        };
        Ok(element
            .with_note(self.name(), format!("text repeated {count} times"))
            .reclassified(ElementKind::PageHeader, self.name()))
    }
}

impl Default for PageHeaderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for PageHeaderClassifier {
    fn name(&self) -> &'static str {
        "PageHeaderClassifier"
    }

    fn iterations(&self) -> usize {
        2
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
        match ctx.iteration() {
            0 => {
                self.collect(&element, ctx);
                Ok(element)
            }
            1 => self.classify(element, ctx),
            iteration => Err(Error::InvalidIteration { iteration }),
        }
    }
}

/// Finds headers whose text changes page to page (dates, page counters)
/// but whose style and offset from the preceding page break do not.
pub struct PageHeaderDistanceClassifier {
    candidates: HashMap<ElementPath, DistanceCandidate>,
    counts: HashMap<DistanceCandidate, usize>,
    order: Vec<DistanceCandidate>,
    retained: Option<HashMap<DistanceCandidate, usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DistanceCandidate {
    style: TextStyle,
    distance: usize,
}

impl PageHeaderDistanceClassifier {
    pub fn new() -> Self {
        Self {
            candidates: HashMap::new(),
            counts: HashMap::new(),
            order: Vec::new(),
            retained: None,
        }
    }

    fn collect(&mut self, element: &SemanticElement, ctx: &ProcessingContext) {
        if element.text().chars().count() > HEADER_TEXT_LIMIT {
            return;
        }
        let Some(distance) = ctx.distance_to_previous_page_break() else {
            return;
        };
        if distance > BREAK_DISTANCE_LIMIT {
            return;
        }
        let candidate = DistanceCandidate {
            style: TextStyle::from_tag(element.tag()),
            distance,
        };
        self.candidates.insert(ctx.element_path(), candidate);
        let count = self.counts.entry(candidate).or_insert(0);
        if *count == 0 {
            self.order.push(candidate);
        }
        *count += 1;
        trace!(
            "style candidate at offset {} counted {count} times",
            candidate.distance
        );
    }

    fn retained_candidates(&self, page_break_count: usize) -> HashMap<DistanceCandidate, usize> {
        let count_of =
            |candidate: &DistanceCandidate| self.counts.get(candidate).copied().unwrap_or(0);
        let mut ranked = self.order.clone();
        // stable sort keeps first-seen order between equal counts
        ranked.sort_by(|a, b| count_of(b).cmp(&count_of(a)));
        ranked.truncate(RANKED_CANDIDATE_LIMIT);
        ranked
            .into_iter()
            .map(|candidate| (candidate, count_of(&candidate)))
            .filter(|&(_, count)| {
                count >= HEADER_REPEAT_THRESHOLD
                    && page_break_count > 0
                    && count as f64 / page_break_count as f64 > PAGE_COVERAGE_RATIO
            })
            .collect()
    }

    fn classify(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if self.retained.is_none() {
            self.retained = Some(self.retained_candidates(ctx.page_break_count()));
        }
        let retained = match self.retained.as_ref() {
            Some(retained) if !retained.is_empty() => retained,
            _ => return Ok(element),
        };
        let Some(candidate) = self.candidates.get(&ctx.element_path()) else {
            return Ok(element);
        };
        let Some(count) = retained.get(candidate) else {
            return Ok(element);
        };
        Ok(element
            .with_note(
                self.name(),
                format!(
                    "style repeated {count} times at {} elements past a page break",
                    candidate.distance
                ),
            )
            .reclassified(ElementKind::PageHeader, self.name()))
    }
}

impl Default for PageHeaderDistanceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for PageHeaderDistanceClassifier {
    fn name(&self) -> &'static str {
        "PageHeaderDistanceClassifier"
    }

    fn iterations(&self) -> usize {
        2
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
        match ctx.iteration() {
            0 => {
                self.collect(&element, ctx);
                Ok(element)
            }
            1 => self.classify(element, ctx),
            iteration => Err(Error::InvalidIteration { iteration }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_root_tags;
    use crate::parser::classify::{
        HighlightedTextClassifier, PageBreakClassifier, TextClassifier,
    };
    use crate::parser::engine::run_step;

    fn classified(html: &str) -> Vec<SemanticElement> {
        let elements: Vec<_> = parse_root_tags(html)
            .into_iter()
            .map(SemanticElement::not_yet_classified)
            .collect();
        let elements = run_step(&mut PageBreakClassifier::new(), elements).unwrap();
        let elements = run_step(&mut TextClassifier::new(), elements).unwrap();
        run_step(&mut HighlightedTextClassifier::new(), elements).unwrap()
    }

    #[test]
    fn test_five_repetitions_without_breaks_become_page_headers() {
        let mut html = String::from("<body>");
        for page in 0..5 {
            html.push_str("<p>ACME INC | FORM 10-Q</p>");
            html.push_str(&format!("<p>body prose for page {page}</p>"));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderClassifier::new(), elements).unwrap();
        for (index, element) in processed.iter().enumerate() {
            if index % 2 == 0 {
                assert!(matches!(element.kind(), ElementKind::PageHeader));
            } else {
                assert!(matches!(element.kind(), ElementKind::Text));
            }
        }
        let entries = processed[0].log().entries();
        assert_eq!(entries[entries.len() - 1].message, "classified as page_header");
        assert!(entries[entries.len() - 2].message.contains("repeated 5 times"));
    }

    #[test]
    fn test_too_few_repetitions_stay_text() {
        let mut html = String::from("<body>");
        for page in 0..4 {
            html.push_str("<p>Acme Inc | Form 10-Q</p>");
            html.push_str(&format!("<p>body prose for page {page}</p>"));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderClassifier::new(), elements).unwrap();
        for element in &processed {
            assert!(matches!(element.kind(), ElementKind::Text));
        }
    }

    #[test]
    fn test_styled_and_plain_repeats_count_separately() {
        // three bold and three plain occurrences of the same text, so
        // neither candidate reaches the threshold on its own
        let mut html = String::from("<body>");
        for page in 0..6 {
            if page % 2 == 0 {
                html.push_str("<p style=\"font-weight:bold\">ACME INC</p>");
            } else {
                html.push_str("<p>ACME INC</p>");
            }
            html.push_str(&format!("<p>body prose for page {page}</p>"));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderClassifier::new(), elements).unwrap();
        for element in &processed {
            assert!(!matches!(element.kind(), ElementKind::PageHeader));
        }
    }

    fn long_body(page: usize) -> String {
        format!(
            "<p>The registrant's results of operations for page {page} are discussed \
             together with the factors that affected them during the period covered \
             by this report.</p>"
        )
    }

    #[test]
    fn test_fixed_offset_style_becomes_page_header() {
        let mut html = String::from("<body>");
        for page in 0..6 {
            html.push_str("<hr>");
            html.push_str(&format!(
                "<p style=\"font-weight:bold\">Quarterly Report, page {page}</p>"
            ));
            html.push_str(&long_body(page));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderDistanceClassifier::new(), elements).unwrap();
        for (index, element) in processed.iter().enumerate() {
            match index % 3 {
                0 => assert!(matches!(element.kind(), ElementKind::PageBreak)),
                1 => assert!(matches!(element.kind(), ElementKind::PageHeader)),
                _ => assert!(matches!(element.kind(), ElementKind::Text)),
            }
        }
    }

    #[test]
    fn test_too_few_pages_stay_highlighted() {
        let mut html = String::from("<body>");
        for page in 0..3 {
            html.push_str("<hr>");
            html.push_str(&format!(
                "<p style=\"font-weight:bold\">Quarterly Report, page {page}</p>"
            ));
            html.push_str(&long_body(page));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderDistanceClassifier::new(), elements).unwrap();
        for element in &processed {
            assert!(!matches!(element.kind(), ElementKind::PageHeader));
        }
    }

    #[test]
    fn test_no_page_breaks_means_no_distance_headers() {
        let mut html = String::from("<body>");
        for page in 0..8 {
            html.push_str(&format!(
                "<p style=\"font-weight:bold\">Quarterly Report, page {page}</p>"
            ));
            html.push_str(&long_body(page));
        }
        html.push_str("</body>");
        let elements = classified(&html);
        let processed = run_step(&mut PageHeaderDistanceClassifier::new(), elements).unwrap();
        for element in &processed {
            assert!(!matches!(element.kind(), ElementKind::PageHeader));
        }
    }
}

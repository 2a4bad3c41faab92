//! Title leveling from style prominence.
//!
//! Every highlighted element becomes a title. Its level is decided by how
//! prominent its style is relative to the other styles seen in the same
//! top-level section: centered beats uppercase beats bold. Styles are
//! ranked per section, so each section numbers its titles from 1.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::Result;
use crate::model::{ElementKind, SemanticElement, TextStyle};
use crate::parser::context::ProcessingContext;
use crate::parser::engine::ProcessingStep;

pub struct TitleClassifier {
    styles_by_section: HashMap<Option<&'static str>, Vec<TextStyle>>,
}

/// Sort key for style prominence, most prominent first when reversed.
fn prominence(style: &TextStyle) -> (bool, bool, bool) {
    (
        style.centered,
        style.all_uppercase,
        style.bold_with_font_weight,
    )
}

impl TitleClassifier {
    pub fn new() -> Self {
        Self {
            styles_by_section: HashMap::new(),
        }
    }

    /// Rank of `style` among the styles seen so far in `section`, 0 being
    /// the most prominent. Registers the style on first sight.
    fn rank(&mut self, section: Option<&'static str>, style: TextStyle) -> u32 {
        let styles = self.styles_by_section.entry(section).or_default();
        if !styles.contains(&style) {
            styles.push(style);
            // stable sort keeps first-seen order between equal keys
            styles.sort_by_key(|style| Reverse(prominence(style)));
        }
        styles
            .iter()
            .position(|known| *known == style)
            .unwrap_or(0) as u32
    }
}

impl Default for TitleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TitleClassifier {
    fn name(&self) -> &'static str {
        "TitleClassifier"
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        let ElementKind::HighlightedText {
            style,
            is_continuation,
        } = element.kind()
        else {
            return Ok(element);
        };
        let (style, is_continuation) = (*style, *is_continuation);
        let rank = self.rank(ctx.section_id(), style);
        // continuations keep the level of the element they continue
        let level = if is_continuation { rank.max(1) } else { rank + 1 };
        Ok(element.reclassified(ElementKind::Title { level }, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_root_tags;
    use crate::model::{FilingType, TopSection};
    use crate::parser::classify::{HighlightedTextClassifier, TextClassifier};
    use crate::parser::engine::run_step;

    fn highlighted(html: &str) -> Vec<SemanticElement> {
        let elements: Vec<_> = parse_root_tags(html)
            .into_iter()
            .map(SemanticElement::not_yet_classified)
            .collect();
        let elements = run_step(&mut TextClassifier::new(), elements).unwrap();
        run_step(&mut HighlightedTextClassifier::new(), elements).unwrap()
    }

    fn levels(elements: &[SemanticElement]) -> Vec<Option<u32>> {
        elements
            .iter()
            .map(|element| match element.kind() {
                ElementKind::Title { level } => Some(*level),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_levels_follow_style_prominence() {
        let html = "<body>\
            <p style=\"text-align:center;font-weight:bold\">Overview</p>\
            <p style=\"font-weight:bold\">Detail</p>\
            <p style=\"text-align:center;font-weight:bold\">Another Overview</p>\
            </body>";
        let processed = run_step(&mut TitleClassifier::new(), highlighted(html)).unwrap();
        assert_eq!(levels(&processed), vec![Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_later_prominent_style_takes_rank_one() {
        let html = "<body>\
            <p style=\"font-weight:bold\">Detail</p>\
            <p style=\"text-align:center;font-weight:bold\">Overview</p>\
            <p style=\"font-weight:bold\">More Detail</p>\
            </body>";
        let processed = run_step(&mut TitleClassifier::new(), highlighted(html)).unwrap();
        assert_eq!(levels(&processed), vec![Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_ranking_is_per_section() {
        let html = "<body>\
            <p>PART I</p>\
            <p style=\"text-align:center;font-weight:bold\">Overview</p>\
            <p>PART II</p>\
            <p style=\"font-weight:bold\">Other Matters</p>\
            </body>";
        let mut elements = highlighted(html);
        let part1 = *TopSection::by_identifier(FilingType::TenQ, "part1").unwrap();
        let part2 = *TopSection::by_identifier(FilingType::TenQ, "part2").unwrap();
        elements[0] = elements[0]
            .clone()
            .reclassified(ElementKind::TopSectionTitle { section: part1 }, "test");
        elements[2] = elements[2]
            .clone()
            .reclassified(ElementKind::TopSectionTitle { section: part2 }, "test");
        let processed = run_step(&mut TitleClassifier::new(), elements).unwrap();
        assert_eq!(levels(&processed), vec![None, Some(1), None, Some(1)]);
    }

    #[test]
    fn test_continuation_keeps_prior_level() {
        let html = "<body>\
            <p style=\"text-align:center;font-weight:bold\">Overview</p>\
            <p continued-at=\"frag2\" style=\"font-weight:bold\">Detail continued</p>\
            <p style=\"font-weight:bold\">Detail</p>\
            </body>";
        let processed = run_step(&mut TitleClassifier::new(), highlighted(html)).unwrap();
        assert_eq!(levels(&processed), vec![Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_plain_text_is_left_alone() {
        let html = "<body><p>just prose</p></body>";
        let processed = run_step(&mut TitleClassifier::new(), highlighted(html)).unwrap();
        assert!(matches!(processed[0].kind(), ElementKind::Text));
    }
}

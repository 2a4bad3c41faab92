//! Top-level section recognition.
//!
//! A single-pass state machine walks the document and matches candidate
//! heading text against the "PART <roman>" and "ITEM <number><letter>"
//! pattern families. Items resolve within the most recently entered part.
//! The active section only ever moves forward in catalog order; text that
//! spuriously matches an earlier entry is left alone, which also keeps
//! repeated page-top section banners available for the page-header steps.

use log::{debug, warn};
use regex::Regex;

use crate::error::Result;
use crate::model::{ElementKind, FilingType, SemanticElement, TopSection, INVALID_SECTION};
use crate::parser::context::ProcessingContext;
use crate::parser::engine::ProcessingStep;

/// Compiled recognizers for the section heading pattern families.
pub(crate) struct SectionPatterns {
    part: Regex,
    item: Regex,
}

/// A heading matched by one of the pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionMatch {
    Part { number: u32 },
    /// "PART <roman>" with a numeral outside the supported range
    UnknownPart,
    Item { number: u32, letter: Option<char> },
}

impl SectionPatterns {
    pub(crate) fn new() -> Self {
        Self {
            part: Regex::new(r"(?i)^part\s+([ivx]+)\b").unwrap(),
            item: Regex::new(r"(?i)^item\s+(\d{1,2})([a-c])?\b").unwrap(),
        }
    }

    /// Whether the text opens with a section heading of either family.
    pub(crate) fn is_part_or_item(&self, text: &str) -> bool {
        self.part.is_match(text) || self.item.is_match(text)
    }

    fn match_section(&self, text: &str) -> Option<SectionMatch> {
        if let Some(captures) = self.part.captures(text) {
            return Some(match roman_to_number(&captures[1]) {
                Some(number) => SectionMatch::Part { number },
                None => SectionMatch::UnknownPart,
            });
        }
        if let Some(captures) = self.item.captures(text) {
            let number = captures[1].parse::<u32>().ok()?;
            let letter = captures
                .get(2)
                .and_then(|m| m.as_str().chars().next())
                .map(|c| c.to_ascii_lowercase());
            return Some(SectionMatch::Item { number, letter });
        }
        None
    }
}

fn roman_to_number(numeral: &str) -> Option<u32> {
    match numeral.to_ascii_lowercase().as_str() {
        "i" => Some(1),
        "ii" => Some(2),
        "iii" => Some(3),
        "iv" => Some(4),
        _ => None,
    }
}

/// Assigns canonical sections to their title elements, walking the catalog
/// for one filing type.
pub struct TopSectionManager {
    filing_type: FilingType,
    patterns: SectionPatterns,
    current: Option<TopSection>,
    current_part: u32,
}

impl TopSectionManager {
    pub fn new(filing_type: FilingType) -> Self {
        Self {
            filing_type,
            patterns: SectionPatterns::new(),
            current: None,
            current_part: 0,
        }
    }

    fn identifier_for(&self, matched: SectionMatch) -> Option<String> {
        match matched {
            SectionMatch::Part { number } => Some(format!("part{number}")),
            SectionMatch::UnknownPart => None,
            SectionMatch::Item { number, letter } => {
                // items before any part header belong to part 1
                let part = if self.current_part == 0 {
                    1
                } else {
                    self.current_part
                };
                Some(match letter {
                    Some(letter) => format!("part{part}item{number}{letter}"),
                    None => format!("part{part}item{number}"),
                })
            }
        }
    }
}

impl ProcessingStep for TopSectionManager {
    fn name(&self) -> &'static str {
        match self.filing_type {
            FilingType::TenQ => "TopSectionManagerFor10Q",
            FilingType::TenK => "TopSectionManagerFor10K",
        }
    }

    fn process_element(
        &mut self,
        element: SemanticElement,
        _ctx: &ProcessingContext,
    ) -> Result<SemanticElement> {
        if !matches!(
            element.kind(),
            ElementKind::NotYetClassified | ElementKind::Text
        ) {
            return Ok(element);
        }
        let Some(matched) = self.patterns.match_section(element.text()) else {
            return Ok(element);
        };
        let Some(section) = self
            .identifier_for(matched)
            .and_then(|identifier| TopSection::by_identifier(self.filing_type, &identifier))
        else {
            debug!(
                "heading {:?} matches no {} catalog entry",
                element.text(),
                self.filing_type
            );
            return Ok(element
                .with_note(self.name(), "matched a section pattern outside the catalog")
                .reclassified(
                    ElementKind::TopSectionTitle {
                        section: INVALID_SECTION,
                    },
                    self.name(),
                ));
        };
        if let Some(current) = &self.current {
            if section.order <= current.order {
                warn!(
                    "ignoring regression to '{}' while in '{}'",
                    section.identifier, current.identifier
                );
                return Ok(element);
            }
        }
        self.current = Some(*section);
        if let SectionMatch::Part { number } = matched {
            self.current_part = number;
        } else if self.current_part == 0 {
            self.current_part = 1;
        }
        debug!("entering section '{}'", section.identifier);
        Ok(element
            .with_note(
                self.name(),
                format!("matched section '{}'", section.identifier),
            )
            .reclassified(
                ElementKind::TopSectionTitle { section: *section },
                self.name(),
            ))
    }
}

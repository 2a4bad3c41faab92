//! Style facets driving the highlighted-text and title classifiers.

use serde::Serialize;

use crate::html::{HtmlTag, StyleMetrics};

/// Minimum share of an element's text (in percent) a style declaration
/// must cover for its facet to count.
pub const PERCENTAGE_THRESHOLD: f32 = 80.0;

/// Numeric `font-weight` at or above which text counts as bold.
pub const BOLD_THRESHOLD: i64 = 600;

/// Boolean style facets of one element's text.
///
/// Equality over all facets is what the frequency-counting steps key on,
/// so the struct derives `Hash` and `Eq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TextStyle {
    /// At least 80% of alphabetic characters are uppercase
    pub all_uppercase: bool,

    /// `font-weight: bold` or a numeric weight of 600 or more
    pub bold_with_font_weight: bool,

    /// `font-style: italic`
    pub italic: bool,

    /// `text-align: center`
    pub centered: bool,

    /// `text-decoration: underline`
    pub underline: bool,
}

impl TextStyle {
    /// Compute the facets for a tag from its aggregated style metrics and
    /// normalized text.
    pub fn from_tag(tag: &HtmlTag) -> Self {
        Self::from_metrics(&tag.style_metrics(), tag.text())
    }

    pub fn from_metrics(metrics: &StyleMetrics, text: &str) -> Self {
        let mut bold = 0.0;
        let mut italic = 0.0;
        let mut centered = 0.0;
        let mut underline = 0.0;
        for (property, value, pct) in metrics.entries() {
            match property {
                "font-weight" if is_bold_weight(value) => bold += pct,
                "font-style" if value == "italic" => italic += pct,
                "text-align" if value == "center" => centered += pct,
                "text-decoration" if value == "underline" => underline += pct,
                _ => {}
            }
        }
        Self {
            all_uppercase: mostly_uppercase(text),
            bold_with_font_weight: bold >= PERCENTAGE_THRESHOLD,
            italic: italic >= PERCENTAGE_THRESHOLD,
            centered: centered >= PERCENTAGE_THRESHOLD,
            underline: underline >= PERCENTAGE_THRESHOLD,
        }
    }

    /// Whether no facet is set.
    pub fn is_empty(&self) -> bool {
        !(self.all_uppercase
            || self.bold_with_font_weight
            || self.italic
            || self.centered
            || self.underline)
    }
}

fn is_bold_weight(value: &str) -> bool {
    value == "bold"
        || value
            .parse::<i64>()
            .map_or(false, |weight| weight >= BOLD_THRESHOLD)
}

fn mostly_uppercase(text: &str) -> bool {
    let total = text.chars().filter(|c| c.is_alphabetic()).count();
    if total == 0 {
        return false;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    100.0 * upper as f32 / total as f32 >= PERCENTAGE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_root_tags;

    fn style_of(html: &str) -> TextStyle {
        let tags = parse_root_tags(html);
        TextStyle::from_tag(&tags[0])
    }

    #[test]
    fn test_bold_literal_and_numeric() {
        assert!(style_of("<body><p style=\"font-weight:bold\">x</p></body>").bold_with_font_weight);
        assert!(style_of("<body><p style=\"font-weight:700\">x</p></body>").bold_with_font_weight);
        assert!(!style_of("<body><p style=\"font-weight:500\">x</p></body>").bold_with_font_weight);
        assert!(!style_of("<body><p style=\"font-weight:normal\">x</p></body>").bold_with_font_weight);
    }

    #[test]
    fn test_facet_requires_80_percent_coverage() {
        // "bold" is 4 of 10 non-whitespace chars
        let style = style_of(
            "<body><p><span style=\"font-weight:bold\">bold</span><span>extras</span></p></body>",
        );
        assert!(!style.bold_with_font_weight);
    }

    #[test]
    fn test_uppercase_counts_letters_only() {
        assert!(style_of("<body><p>ITEM 1A.</p></body>").all_uppercase);
        assert!(!style_of("<body><p>Item 1</p></body>").all_uppercase);
        assert!(!style_of("<body><p>123</p></body>").all_uppercase);
    }

    #[test]
    fn test_centered_italic_underline() {
        let style = style_of(
            "<body><p style=\"text-align:center;font-style:italic;text-decoration:underline\">\
             Heading</p></body>",
        );
        assert!(style.centered);
        assert!(style.italic);
        assert!(style.underline);
        assert!(!style.is_empty());
    }

    #[test]
    fn test_unstyled_lowercase_is_empty() {
        assert!(style_of("<body><p>plain paragraph text</p></body>").is_empty());
    }

    #[test]
    fn test_equality_as_map_key() {
        use std::collections::HashMap;
        let a = style_of("<body><p style=\"font-weight:bold\">A</p></body>");
        let b = style_of("<body><p style=\"font-weight:600\">B</p></body>");
        let mut counts: HashMap<TextStyle, usize> = HashMap::new();
        *counts.entry(a).or_insert(0) += 1;
        *counts.entry(b).or_insert(0) += 1;
        // same facets, one key
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&a], 2);
    }
}

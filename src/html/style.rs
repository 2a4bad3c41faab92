//! Aggregated inline style metrics.
//!
//! EDGAR filings carry their styling almost exclusively in inline `style`
//! attributes. For classification we need one question answered per node:
//! what share of the node's text is covered by a given (property, value)
//! declaration. The walk merges ancestor declarations (nearest ancestor
//! wins per property) and weights each text leaf by its non-whitespace
//! character count.

use std::collections::HashMap;

use crate::html::tag::{HtmlTag, TagChild};

/// Map from (CSS property, value) to the percentage (0..=100) of the
/// node's text covered by that declaration.
#[derive(Debug, Clone, Default)]
pub struct StyleMetrics {
    entries: HashMap<(String, String), f32>,
}

impl StyleMetrics {
    /// Compute metrics for a tag subtree.
    pub fn compute(tag: &HtmlTag) -> Self {
        let mut weights: HashMap<(String, String), usize> = HashMap::new();
        let mut total = 0usize;
        let own = tag.own_style();
        accumulate(tag, &own, &mut weights, &mut total);
        if total == 0 {
            return Self::default();
        }
        let entries = weights
            .into_iter()
            .map(|(key, covered)| (key, 100.0 * covered as f32 / total as f32))
            .collect();
        Self { entries }
    }

    /// Coverage percentage for a (property, value) pair, 0.0 when absent.
    pub fn percentage(&self, property: &str, value: &str) -> f32 {
        self.entries
            .get(&(property.to_string(), value.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// All (property, value, percentage) entries, unordered.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f32)> {
        self.entries
            .iter()
            .map(|((property, value), pct)| (property.as_str(), value.as_str(), *pct))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn accumulate(
    tag: &HtmlTag,
    inherited: &[(String, String)],
    weights: &mut HashMap<(String, String), usize>,
    total: &mut usize,
) {
    for child in tag.raw_children() {
        match child {
            TagChild::Text(text) => {
                let weight = text.chars().filter(|c| !c.is_whitespace()).count();
                if weight == 0 {
                    continue;
                }
                *total += weight;
                for (property, value) in effective(inherited) {
                    *weights.entry((property, value)).or_insert(0) += weight;
                }
            }
            TagChild::Tag(_) => {}
        }
    }
    for child_tag in tag.children() {
        let mut merged = inherited.to_vec();
        merged.extend(child_tag.own_style());
        accumulate(&child_tag, &merged, weights, total);
    }
}

// Later (nearer) declarations override earlier ones per property.
fn effective(declarations: &[(String, String)]) -> Vec<(String, String)> {
    let mut map: HashMap<&str, &str> = HashMap::new();
    for (property, value) in declarations {
        map.insert(property, value);
    }
    map.into_iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

/// Parse an inline `style` attribute into (property, value) pairs in
/// declaration order, lowercased and trimmed.
pub(crate) fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim().to_ascii_lowercase();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_root_tags;

    fn metrics_of(html: &str) -> StyleMetrics {
        let tags = parse_root_tags(html);
        tags[0].style_metrics()
    }

    #[test]
    fn test_parse_inline_style() {
        let parsed = parse_inline_style("Font-Weight: Bold; text-align:center;;broken");
        assert_eq!(
            parsed,
            vec![
                ("font-weight".to_string(), "bold".to_string()),
                ("text-align".to_string(), "center".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_coverage() {
        let metrics =
            metrics_of("<body><p style=\"font-weight:bold\">All bold text</p></body>");
        assert_eq!(metrics.percentage("font-weight", "bold"), 100.0);
    }

    #[test]
    fn test_partial_coverage() {
        // 4 styled chars ("bold") out of 8 total ("bold" + "else")
        let metrics = metrics_of(
            "<body><p><span style=\"font-weight:bold\">bold</span><span>else</span></p></body>",
        );
        assert_eq!(metrics.percentage("font-weight", "bold"), 50.0);
    }

    #[test]
    fn test_child_overrides_parent() {
        let metrics = metrics_of(
            "<body><p style=\"font-style:italic\">\
             <span style=\"font-style:normal\">plain</span></p></body>",
        );
        assert_eq!(metrics.percentage("font-style", "italic"), 0.0);
        assert_eq!(metrics.percentage("font-style", "normal"), 100.0);
    }

    #[test]
    fn test_whitespace_carries_no_weight() {
        let metrics = metrics_of(
            "<body><p><span style=\"font-weight:bold\">ab</span>   </p></body>",
        );
        assert_eq!(metrics.percentage("font-weight", "bold"), 100.0);
    }

    #[test]
    fn test_no_text_is_empty() {
        let metrics = metrics_of("<body><div style=\"font-weight:bold\"></div></body>");
        assert!(metrics.is_empty());
    }
}

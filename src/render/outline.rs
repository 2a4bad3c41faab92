//! Plain-text outline of a parsed tree.

use crate::model::ElementKind;
use crate::tree::SemanticTree;

/// Render the tree's headings as an indented outline, two spaces per
/// nesting level. Non-heading nodes are skipped.
pub fn to_outline(tree: &SemanticTree) -> String {
    let mut output = String::new();
    for (node, depth) in tree.iter() {
        let line = match node.element.kind() {
            ElementKind::TopSectionTitle { section } => {
                let text = node.element.text();
                if text.is_empty() {
                    section.title.to_string()
                } else {
                    text.to_string()
                }
            }
            ElementKind::Title { .. } => node.element.text().to_string(),
            _ => continue,
        };
        output.push_str(&"  ".repeat(depth));
        output.push_str(line.trim());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlTag;
    use crate::model::{FilingType, SemanticElement, TopSection};

    fn element(text: &str, kind: ElementKind) -> SemanticElement {
        let tag = HtmlTag::synthetic("p", Vec::new(), Vec::new()).clone_with_text(text);
        SemanticElement::new(tag, kind)
    }

    fn section(identifier: &str, text: &str) -> SemanticElement {
        let section = *TopSection::by_identifier(FilingType::TenQ, identifier).unwrap();
        element(text, ElementKind::TopSectionTitle { section })
    }

    #[test]
    fn test_outline_indents_headings() {
        let tree = SemanticTree::build(vec![
            section("part1", "PART I"),
            section("part1item2", "Item 2. Management's Discussion"),
            element("Liquidity", ElementKind::Title { level: 1 }),
            element("prose", ElementKind::Text),
            section("part2", "PART II"),
        ]);
        let outline = to_outline(&tree);
        let lines: Vec<&str> = outline.lines().collect();
        assert_eq!(
            lines,
            vec![
                "PART I",
                "  Item 2. Management's Discussion",
                "    Liquidity",
                "PART II",
            ]
        );
    }

    #[test]
    fn test_outline_falls_back_to_catalog_title() {
        let tree = SemanticTree::build(vec![section("part1", "")]);
        assert_eq!(to_outline(&tree), "Financial Information\n");
    }

    #[test]
    fn test_outline_of_flat_prose_is_empty() {
        let tree = SemanticTree::build(vec![
            element("a", ElementKind::Text),
            element("b", ElementKind::Text),
        ]);
        assert!(to_outline(&tree).is_empty());
    }
}

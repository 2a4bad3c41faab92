//! JSON records for elements and trees.

use serde::Serialize;

use crate::error::Result;
use crate::model::{Derivation, ElementKind, LogEntry, SemanticElement, TextStyle};
use crate::tree::{SemanticTree, TreeNode};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Characters of element text kept inline in a record.
const PREVIEW_CHARS: usize = 80;

/// Flat, serializable view of one semantic element.
#[derive(Debug, Clone, Serialize)]
pub struct ElementRecord {
    pub kind: &'static str,

    /// Element text, truncated to a preview for long elements.
    pub text: String,

    /// Full text, present only when `text` is a truncated preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_continuation: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<Derivation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementRecord>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<LogEntry>,
}

impl ElementRecord {
    pub fn from_element(element: &SemanticElement) -> Self {
        let full = element.text();
        let (text, full_text) = if full.chars().count() > PREVIEW_CHARS {
            let preview: String = full.chars().take(PREVIEW_CHARS).collect();
            (preview, Some(full.to_string()))
        } else {
            (full.to_string(), None)
        };
        let mut record = Self {
            kind: element.kind().name(),
            text,
            full_text,
            level: None,
            section: None,
            style: None,
            is_continuation: None,
            derived: element.derivation(),
            children: Vec::new(),
            log: element.log().entries().to_vec(),
        };
        match element.kind() {
            ElementKind::Title { level } => record.level = Some(*level),
            ElementKind::TopSectionTitle { section } => {
                record.section = Some(section.identifier);
                record.level = Some(section.level);
            }
            ElementKind::HighlightedText {
                style,
                is_continuation,
            } => {
                record.style = Some(*style);
                record.is_continuation = Some(*is_continuation);
            }
            ElementKind::Composite { children } => {
                record.children = children.iter().map(ElementRecord::from_element).collect();
            }
            _ => {}
        }
        record
    }
}

/// Recursive, serializable view of one tree node.
#[derive(Debug, Clone, Serialize)]
pub struct TreeRecord {
    #[serde(flatten)]
    pub element: ElementRecord,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TreeRecord>,
}

impl TreeRecord {
    pub fn from_node(node: &TreeNode) -> Self {
        Self {
            element: ElementRecord::from_element(&node.element),
            nested: node.children.iter().map(TreeRecord::from_node).collect(),
        }
    }
}

/// Serialize a flat element sequence to JSON.
pub fn to_json(elements: &[SemanticElement], format: JsonFormat) -> Result<String> {
    let records: Vec<ElementRecord> = elements.iter().map(ElementRecord::from_element).collect();
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&records)?,
        JsonFormat::Compact => serde_json::to_string(&records)?,
    };
    Ok(json)
}

/// Serialize a tree to JSON, roots as a top-level array.
pub fn tree_to_json(tree: &SemanticTree, format: JsonFormat) -> Result<String> {
    let records: Vec<TreeRecord> = tree.roots.iter().map(TreeRecord::from_node).collect();
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&records)?,
        JsonFormat::Compact => serde_json::to_string(&records)?,
    };
    Ok(json)
}

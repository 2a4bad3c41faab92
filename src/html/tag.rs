//! Owned HTML tag tree.
//!
//! The pipeline never touches `scraper`'s arena directly: each top-level
//! node of the source document is converted once into an owned `HtmlTag`
//! tree, so semantic elements can hold their node without borrowing from
//! the parsed document, and the pre-merger can synthesize nodes that never
//! existed in the source.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use scraper::{ElementRef, Html, Node};
use unicode_normalization::UnicodeNormalization;

use crate::html::style::{parse_inline_style, StyleMetrics};

/// One node of an owned HTML tree. Cheap to clone (shared backing node).
///
/// Tags are immutable after construction; "modifying" operations such as
/// [`HtmlTag::clone_with_text`] build new nodes.
#[derive(Clone)]
pub struct HtmlTag {
    node: Rc<TagNode>,
}

pub(crate) struct TagNode {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<TagChild>,
    text_cache: OnceCell<String>,
}

pub(crate) enum TagChild {
    Tag(Rc<TagNode>),
    Text(String),
}

impl HtmlTag {
    fn from_node(node: Rc<TagNode>) -> Self {
        Self { node }
    }

    /// Build an owned tag tree from a parsed `scraper` element.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let mut children = Vec::new();
        for child in element.children() {
            match child.value() {
                Node::Element(_) => {
                    if let Some(child_ref) = ElementRef::wrap(child) {
                        children.push(TagChild::Tag(Self::from_element(child_ref).node));
                    }
                }
                Node::Text(text) => {
                    children.push(TagChild::Text(text.to_string()));
                }
                _ => {}
            }
        }
        let attrs = element
            .value()
            .attrs()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        Self::from_node(Rc::new(TagNode {
            name: element.value().name().to_ascii_lowercase(),
            attrs,
            children,
            text_cache: OnceCell::new(),
        }))
    }

    /// Build a synthetic tag with the given name, attributes and children.
    pub fn synthetic(
        name: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: Vec<HtmlTag>,
    ) -> Self {
        Self::from_node(Rc::new(TagNode {
            name: name.into(),
            attrs,
            children: children
                .into_iter()
                .map(|child| TagChild::Tag(child.node))
                .collect(),
            text_cache: OnceCell::new(),
        }))
    }

    /// Childless copy of this tag holding only the given text.
    pub fn clone_with_text(&self, text: impl Into<String>) -> Self {
        Self::from_node(Rc::new(TagNode {
            name: self.node.name.clone(),
            attrs: self.node.attrs.clone(),
            children: vec![TagChild::Text(text.into())],
            text_cache: OnceCell::new(),
        }))
    }

    /// Copy of this tag with its children replaced.
    pub fn clone_with_children(&self, children: Vec<HtmlTag>) -> Self {
        Self::from_node(Rc::new(TagNode {
            name: self.node.name.clone(),
            attrs: self.node.attrs.clone(),
            children: children
                .into_iter()
                .map(|child| TagChild::Tag(child.node))
                .collect(),
            text_cache: OnceCell::new(),
        }))
    }

    /// Lowercased tag name.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Attribute value by (lowercased) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.node
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct element children, skipping text nodes.
    pub fn children(&self) -> Vec<HtmlTag> {
        self.node
            .children
            .iter()
            .filter_map(|child| match child {
                TagChild::Tag(node) => Some(Self::from_node(Rc::clone(node))),
                TagChild::Text(_) => None,
            })
            .collect()
    }

    /// Whether any direct child is an element.
    pub fn has_element_children(&self) -> bool {
        self.node
            .children
            .iter()
            .any(|child| matches!(child, TagChild::Tag(_)))
    }

    /// Normalized text content of the whole subtree: NFKC-normalized (EDGAR
    /// HTML is full of non-breaking spaces), whitespace runs collapsed,
    /// trimmed. Computed once per node.
    pub fn text(&self) -> &str {
        self.node.text_cache.get_or_init(|| {
            let mut raw = String::new();
            collect_text(&self.node, &mut raw);
            normalize_text(&raw)
        })
    }

    /// Whether the subtree contains at least one alphanumeric character.
    pub fn contains_words(&self) -> bool {
        self.text().chars().any(|c| c.is_alphanumeric())
    }

    /// Whether a tag with the given name exists in this subtree.
    pub fn contains_tag(&self, name: &str, include_self: bool) -> bool {
        if include_self && self.node.name == name {
            return true;
        }
        self.node.children.iter().any(|child| match child {
            TagChild::Tag(node) => Self::from_node(Rc::clone(node)).contains_tag(name, true),
            TagChild::Text(_) => false,
        })
    }

    /// All descendant tags with the given name, in document order
    /// (self excluded).
    pub fn find_tags(&self, name: &str) -> Vec<HtmlTag> {
        let mut found = Vec::new();
        find_tags_into(&self.node, name, &mut found);
        found
    }

    /// Count descendant text leaves whose normalized text satisfies the
    /// predicate. With `exclude_links`, leaves inside an `<a>` are skipped.
    pub fn count_text_matches_in_descendants(
        &self,
        predicate: impl Fn(&str) -> bool,
        exclude_links: bool,
    ) -> usize {
        let mut count = 0;
        count_text_matches(&self.node, &predicate, exclude_links, false, &mut count);
        count
    }

    /// Aggregated inline style metrics for this subtree.
    pub fn style_metrics(&self) -> StyleMetrics {
        StyleMetrics::compute(self)
    }

    pub(crate) fn own_style(&self) -> Vec<(String, String)> {
        self.attr("style").map(parse_inline_style).unwrap_or_default()
    }

    pub(crate) fn raw_children(&self) -> &[TagChild] {
        &self.node.children
    }
}

impl fmt::Debug for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlTag")
            .field("name", &self.node.name)
            .field("text", &self.text())
            .finish()
    }
}

// Text leaves are concatenated without injected separators; source
// whitespace between tags survives as text nodes, and normalization
// collapses it afterwards.
fn collect_text(node: &TagNode, out: &mut String) {
    for child in &node.children {
        match child {
            TagChild::Text(text) => out.push_str(text),
            TagChild::Tag(tag) => collect_text(tag, out),
        }
    }
}

/// NFKC-normalize, then collapse whitespace runs to single spaces and trim.
pub(crate) fn normalize_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let mut out = String::with_capacity(normalized.len());
    let mut last_was_space = true;
    for c in normalized.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

fn find_tags_into(node: &TagNode, name: &str, found: &mut Vec<HtmlTag>) {
    for child in &node.children {
        if let TagChild::Tag(tag) = child {
            if tag.name == name {
                found.push(HtmlTag {
                    node: Rc::clone(tag),
                });
            }
            find_tags_into(tag, name, found);
        }
    }
}

fn count_text_matches(
    node: &TagNode,
    predicate: &impl Fn(&str) -> bool,
    exclude_links: bool,
    inside_link: bool,
    count: &mut usize,
) {
    for child in &node.children {
        match child {
            TagChild::Text(text) => {
                if exclude_links && inside_link {
                    continue;
                }
                if predicate(&normalize_text(text)) {
                    *count += 1;
                }
            }
            TagChild::Tag(tag) => {
                let in_link = inside_link || tag.name == "a";
                count_text_matches(tag, predicate, exclude_links, in_link, count);
            }
        }
    }
}

/// Parse an HTML document and return its top-level tags in document order.
///
/// Top-level means the direct element children of `<body>` (EDGAR filings
/// wrap all content there); whitespace-only text between them is dropped.
pub fn parse_root_tags(html: &str) -> Vec<HtmlTag> {
    let document = Html::parse_document(html);
    let body_selector =
        scraper::Selector::parse("body").unwrap_or_else(|_| unreachable!("static selector"));
    let Some(body) = document.select(&body_selector).next() else {
        return Vec::new();
    };
    body.children()
        .filter_map(ElementRef::wrap)
        .map(HtmlTag::from_element)
        .collect()
}

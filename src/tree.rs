//! Nests the flat element sequence into a tree.
//!
//! Section titles and regular titles open scopes, everything else attaches
//! to the innermost open scope. A new scope closes every open scope at the
//! same or a deeper nesting level before it opens.

use crate::model::{ElementKind, SemanticElement};

/// An element with the elements nested under it.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub element: SemanticElement,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(element: SemanticElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::subtree_size)
            .sum::<usize>()
    }
}

/// Tree view over a parsed filing.
#[derive(Debug, Clone, Default)]
pub struct SemanticTree {
    pub roots: Vec<TreeNode>,
}

/// Nesting level an element opens a scope at. Part titles sit above item
/// titles, and leveled titles nest below both.
fn scope_level(element: &SemanticElement) -> Option<u32> {
    match element.kind() {
        ElementKind::TopSectionTitle { section } => Some(section.level),
        ElementKind::Title { level } => Some(level + 1),
        _ => None,
    }
}

impl SemanticTree {
    /// Builds the tree from elements in document order.
    pub fn build(elements: Vec<SemanticElement>) -> Self {
        let mut roots: Vec<TreeNode> = Vec::new();
        let mut stack: Vec<(u32, TreeNode)> = Vec::new();

        fn close_scope(stack: &mut Vec<(u32, TreeNode)>, roots: &mut Vec<TreeNode>) {
            if let Some((_, node)) = stack.pop() {
                match stack.last_mut() {
                    Some((_, parent)) => parent.children.push(node),
                    None => roots.push(node),
                }
            }
        }

        for element in elements {
            match scope_level(&element) {
                Some(level) => {
                    while stack
                        .last()
                        .is_some_and(|(open_level, _)| *open_level >= level)
                    {
                        close_scope(&mut stack, &mut roots);
                    }
                    stack.push((level, TreeNode::new(element)));
                }
                None => match stack.last_mut() {
                    Some((_, parent)) => parent.children.push(TreeNode::new(element)),
                    None => roots.push(TreeNode::new(element)),
                },
            }
        }
        while !stack.is_empty() {
            close_scope(&mut stack, &mut roots);
        }
        Self { roots }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_size).sum()
    }

    /// Depth-first traversal yielding each node with its depth, roots at 0.
    pub fn iter(&self) -> TreeIter<'_> {
        let mut pending: Vec<(&TreeNode, usize)> = Vec::new();
        for root in self.roots.iter().rev() {
            pending.push((root, 0));
        }
        TreeIter { pending }
    }
}

pub struct TreeIter<'a> {
    pending: Vec<(&'a TreeNode, usize)>,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = (&'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.pending.pop()?;
        for child in node.children.iter().rev() {
            self.pending.push((child, depth + 1));
        }
        Some((node, depth))
    }
}

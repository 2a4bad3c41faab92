//! Per-iteration state shared with every classification step.

use crate::model::TopSection;

/// Stable identity of an element slot within one pipeline run: the
/// top-level index plus the child path for elements nested in composites.
///
/// Slots keep their position for the whole run; classification replaces
/// values in place and never inserts or removes elements, so multi-pass
/// steps can use the path as a map key across iterations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementPath {
    pub index: usize,
    pub children: Vec<usize>,
}

/// Read-only view handed to a step for each visited element.
///
/// The engine rebuilds the context at the start of every iteration and
/// updates the cursor fields between visits.
#[derive(Debug)]
pub struct ProcessingContext {
    iteration: usize,
    element_index: usize,
    child_path: Vec<usize>,
    section: Option<TopSection>,
    page_break_positions: Vec<usize>,
}

impl ProcessingContext {
    pub(crate) fn new(iteration: usize, page_break_positions: Vec<usize>) -> Self {
        Self {
            iteration,
            element_index: 0,
            child_path: Vec::new(),
            section: None,
            page_break_positions,
        }
    }

    /// Current pass of a multi-pass step, starting at 0.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Top-level index of the element being visited.
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// Identity of the visited slot, usable as a map key across iterations.
    pub fn element_path(&self) -> ElementPath {
        ElementPath {
            index: self.element_index,
            children: self.child_path.clone(),
        }
    }

    /// Section the walk is currently inside, if any has been entered.
    pub fn section(&self) -> Option<TopSection> {
        self.section
    }

    /// Identifier of the active section.
    pub fn section_id(&self) -> Option<&'static str> {
        self.section.map(|section| section.identifier)
    }

    /// Number of page breaks in the sequence this iteration started from.
    pub fn page_break_count(&self) -> usize {
        self.page_break_positions.len()
    }

    /// Number of slots back to the nearest preceding page break, `None`
    /// when no page break precedes the current element.
    pub fn distance_to_previous_page_break(&self) -> Option<usize> {
        if self.element_index == 0 {
            return None;
        }
        let upper = self
            .page_break_positions
            .partition_point(|&position| position < self.element_index);
        if upper == 0 {
            return None;
        }
        Some(self.element_index - self.page_break_positions[upper - 1])
    }

    /// Number of slots forward to the nearest following page break, `None`
    /// when no page break follows the current element.
    pub fn distance_to_next_page_break(&self) -> Option<usize> {
        let lower = self
            .page_break_positions
            .partition_point(|&position| position <= self.element_index);
        self.page_break_positions
            .get(lower)
            .map(|position| position - self.element_index)
    }

    pub(crate) fn set_cursor(&mut self, element_index: usize, child_path: &[usize]) {
        self.element_index = element_index;
        self.child_path.clear();
        self.child_path.extend_from_slice(child_path);
    }

    pub(crate) fn set_section(&mut self, section: TopSection) {
        self.section = Some(section);
    }
}

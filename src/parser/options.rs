//! Parsing options.

use crate::model::FilingType;

/// Options controlling the classification pipeline.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Filing form to parse as; `None` means detect from content
    pub filing_type: Option<FilingType>,

    /// Collapse uniformly styled inline runs before classification
    pub premerge: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filing form explicitly.
    pub fn with_filing_type(mut self, filing_type: FilingType) -> Self {
        self.filing_type = Some(filing_type);
        self
    }

    /// Enable or disable the inline-run pre-merger.
    pub fn with_premerge(mut self, premerge: bool) -> Self {
        self.premerge = premerge;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filing_type: None,
            premerge: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ParseOptions::new()
            .with_filing_type(FilingType::TenK)
            .with_premerge(false);
        assert_eq!(options.filing_type, Some(FilingType::TenK));
        assert!(!options.premerge);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.filing_type, None);
        assert!(options.premerge);
    }
}

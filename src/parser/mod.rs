//! Multi-pass classification pipeline for filing HTML.

mod classify;
mod context;
mod engine;
mod extractor;
mod headers;
mod options;
mod premerge;
mod sections;
mod titles;

pub use classify::{
    EmptyElementClassifier, HighlightedTextClassifier, ImageClassifier,
    IntroductorySectionClassifier, PageBreakClassifier, PageNumberClassifier,
    SupplementaryTextClassifier, TableClassifier, TableOfContentsClassifier, TextClassifier,
};
pub use context::{ElementPath, ProcessingContext};
pub use engine::{FilingParser, ProcessingStep};
pub use extractor::{ElementExtractor, SingleElementCheck};
pub use headers::{PageHeaderClassifier, PageHeaderDistanceClassifier};
pub use options::ParseOptions;
pub use premerge::TextPreMerger;
pub use sections::TopSectionManager;
pub use titles::TitleClassifier;

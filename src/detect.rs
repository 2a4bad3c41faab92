//! Filing type detection from document content.

use crate::html::parse_root_tags;
use crate::model::FilingType;

/// Markers that identify a quarterly report, most specific first.
const QUARTERLY_MARKERS: &[&str] = &["form 10-q", "quarterly report"];

/// Markers that identify an annual report, most specific first.
const ANNUAL_MARKERS: &[&str] = &["form 10-k", "annual report"];

/// Detect the filing type from document HTML.
///
/// Scans the document text for the form markers that appear on a filing's
/// cover page. When both filing types are mentioned, the earlier mention
/// wins; cover pages name their own form before anything else does.
///
/// # Arguments
/// * `html` - The filing document HTML
///
/// # Returns
/// * `Some(FilingType)` if a form marker was found
/// * `None` if the document names no recognizable form
///
/// # Example
/// ```
/// use unfiling::detect::detect_filing_type;
/// use unfiling::FilingType;
///
/// let html = "<html><body><p>FORM 10-Q</p></body></html>";
/// assert_eq!(detect_filing_type(html), Some(FilingType::TenQ));
/// ```
pub fn detect_filing_type(html: &str) -> Option<FilingType> {
    let text = parse_root_tags(html)
        .iter()
        .map(|tag| tag.text().to_string())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let quarterly = earliest_marker(&text, QUARTERLY_MARKERS);
    let annual = earliest_marker(&text, ANNUAL_MARKERS);
    match (quarterly, annual) {
        (Some(q), Some(a)) if a < q => Some(FilingType::TenK),
        (Some(_), _) => Some(FilingType::TenQ),
        (None, Some(_)) => Some(FilingType::TenK),
        (None, None) => None,
    }
}

/// Position of the first occurrence of any marker.
fn earliest_marker(text: &str, markers: &[&str]) -> Option<usize> {
    markers.iter().filter_map(|marker| text.find(marker)).min()
}

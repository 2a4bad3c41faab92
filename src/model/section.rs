//! Canonical top-level section catalogs for 10-Q and 10-K filings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// SEC filing form handled by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilingType {
    /// Quarterly report
    #[serde(rename = "10-Q")]
    TenQ,
    /// Annual report
    #[serde(rename = "10-K")]
    TenK,
}

impl FilingType {
    /// The canonical section catalog for this form, in filing order.
    pub fn sections(self) -> &'static [TopSection] {
        match self {
            FilingType::TenQ => SECTIONS_10Q,
            FilingType::TenK => SECTIONS_10K,
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilingType::TenQ => write!(f, "10-Q"),
            FilingType::TenK => write!(f, "10-K"),
        }
    }
}

impl FromStr for FilingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "10-q" | "10q" => Ok(FilingType::TenQ),
            "10-k" | "10k" => Ok(FilingType::TenK),
            other => Err(Error::Other(format!("unknown filing type: {other}"))),
        }
    }
}

/// One entry of a canonical section catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TopSection {
    /// Unique identifier, e.g. `part1item2`
    pub identifier: &'static str,

    /// Display title from the form
    pub title: &'static str,

    /// Position in the catalog's total order
    pub order: i32,

    /// 0 for a Part, 1 for an Item within a part
    pub level: u32,
}

impl TopSection {
    /// Look up a catalog entry by identifier.
    pub fn by_identifier(filing_type: FilingType, identifier: &str) -> Option<&'static TopSection> {
        filing_type
            .sections()
            .iter()
            .find(|section| section.identifier == identifier)
    }
}

/// Sentinel for section titles that match no catalog entry.
pub const INVALID_SECTION: TopSection = TopSection {
    identifier: "invalid",
    title: "Invalid",
    order: -1,
    level: 1,
};

pub const SECTIONS_10Q: &[TopSection] = &[
    TopSection {
        identifier: "part1",
        title: "Financial Information",
        order: 0,
        level: 0,
    },
    TopSection {
        identifier: "part1item1",
        title: "Financial Statements",
        order: 1,
        level: 1,
    },
    TopSection {
        identifier: "part1item2",
        title: "Management's Discussion and Analysis of Financial Condition and Results of Operations",
        order: 2,
        level: 1,
    },
    TopSection {
        identifier: "part1item3",
        title: "Quantitative and Qualitative Disclosures About Market Risk",
        order: 3,
        level: 1,
    },
    TopSection {
        identifier: "part1item4",
        title: "Controls and Procedures",
        order: 4,
        level: 1,
    },
    TopSection {
        identifier: "part2",
        title: "Other Information",
        order: 5,
        level: 0,
    },
    TopSection {
        identifier: "part2item1",
        title: "Legal Proceedings",
        order: 6,
        level: 1,
    },
    TopSection {
        identifier: "part2item1a",
        title: "Risk Factors",
        order: 7,
        level: 1,
    },
    TopSection {
        identifier: "part2item2",
        title: "Unregistered Sales of Equity Securities and Use of Proceeds",
        order: 8,
        level: 1,
    },
    TopSection {
        identifier: "part2item3",
        title: "Defaults Upon Senior Securities",
        order: 9,
        level: 1,
    },
    TopSection {
        identifier: "part2item4",
        title: "Mine Safety Disclosures",
        order: 10,
        level: 1,
    },
    TopSection {
        identifier: "part2item5",
        title: "Other Information",
        order: 11,
        level: 1,
    },
    TopSection {
        identifier: "part2item6",
        title: "Exhibits",
        order: 12,
        level: 1,
    },
];

pub const SECTIONS_10K: &[TopSection] = &[
    TopSection {
        identifier: "part1",
        title: "Financial Information",
        order: 0,
        level: 0,
    },
    TopSection {
        identifier: "part1item1",
        title: "Financial Statements",
        order: 1,
        level: 1,
    },
    TopSection {
        identifier: "part1item1a",
        title: "Risk Factors",
        order: 2,
        level: 1,
    },
    TopSection {
        identifier: "part1item1b",
        title: "Risk Factors",
        order: 3,
        level: 1,
    },
    TopSection {
        identifier: "part1item1c",
        title: "Cybersecurity",
        order: 4,
        level: 1,
    },
    TopSection {
        identifier: "part1item2",
        title: "Properties",
        order: 5,
        level: 1,
    },
    TopSection {
        identifier: "part1item3",
        title: "Legal Proceedings",
        order: 6,
        level: 1,
    },
    TopSection {
        identifier: "part1item4",
        title: "Submission of Matters to a Vote",
        order: 7,
        level: 1,
    },
    TopSection {
        identifier: "part2",
        title: "Other Information",
        order: 8,
        level: 0,
    },
    TopSection {
        identifier: "part2item5",
        title: "Market for Registrant's Common Equity, Related Stockholder Matters and Issuer Purchases of Equity Securities",
        order: 9,
        level: 1,
    },
    TopSection {
        identifier: "part2item6",
        title: "Selected Financial Data",
        order: 10,
        level: 1,
    },
    TopSection {
        identifier: "part2item7",
        title: "Management's Discussion and Analysis of Financial Condition and Results of Operations",
        order: 11,
        level: 1,
    },
    TopSection {
        identifier: "part2item7a",
        title: "Quantitative and Qualitative Disclosures about Market Risk",
        order: 12,
        level: 1,
    },
    TopSection {
        identifier: "part2item8",
        title: "Financial Statements and Supplementary Data",
        order: 13,
        level: 1,
    },
    TopSection {
        identifier: "part2item9",
        title: "Changes in and Disagreements With Accountants on Accounting and Financial Disclosure",
        order: 14,
        level: 1,
    },
    TopSection {
        identifier: "part2item9a",
        title: "Controls and Procedures",
        order: 15,
        level: 1,
    },
    TopSection {
        identifier: "part2item9b",
        title: "Other Information",
        order: 16,
        level: 1,
    },
    TopSection {
        identifier: "part2item9c",
        title: "Disclosure Regarding Foreign Jurisdictions that Prevent Inspections",
        order: 17,
        level: 1,
    },
    TopSection {
        identifier: "part3",
        title: "Other Information",
        order: 18,
        level: 0,
    },
    TopSection {
        identifier: "part3item10",
        title: "Directors and Executive Officers of the Registrant",
        order: 19,
        level: 1,
    },
    TopSection {
        identifier: "part3item11",
        title: "Executive Compensation",
        order: 20,
        level: 1,
    },
    TopSection {
        identifier: "part3item12",
        title: "Security Ownership of Certain Beneficial Owners and Management",
        order: 21,
        level: 1,
    },
    TopSection {
        identifier: "part3item13",
        title: "Certain Relationships and Related Transactions",
        order: 22,
        level: 1,
    },
    TopSection {
        identifier: "part3item14",
        title: "Principal Accountant Fees and Services",
        order: 23,
        level: 1,
    },
    TopSection {
        identifier: "part4",
        title: "",
        order: 24,
        level: 0,
    },
    TopSection {
        identifier: "part4item15",
        title: "Exhibit and Financial Statement Schedules.",
        order: 25,
        level: 1,
    },
    TopSection {
        identifier: "part4item16",
        title: "Form 10-K Summary",
        order: 26,
        level: 1,
    },
];

//! Checklist registry: the clause categories the model is asked to find.
//!
//! Categories follow the CUAD (Contract Understanding Atticus Dataset) naming,
//! narrowed to what matters for a student reading a loan or an insurance
//! policy. The two built-in variants are static; a deployment can swap in its
//! own [`Checklist`] without touching the pipeline.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One checklist line: a clause category and the hint shown to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub category: Cow<'static, str>,
    pub hint: Cow<'static, str>,
}

impl ChecklistEntry {
    pub fn new(category: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            category: Cow::Owned(category.into()),
            hint: Cow::Owned(hint.into()),
        }
    }

    const fn builtin(category: &'static str, hint: &'static str) -> Self {
        Self {
            category: Cow::Borrowed(category),
            hint: Cow::Borrowed(hint),
        }
    }
}

/// Comparison key for category names: trimmed, ASCII-lowercased.
///
/// Deduplication and date-category matching both compare through this key,
/// so `"Expiration Date"` and `"expiration date "` are the same category.
pub fn category_key(category: &str) -> String {
    category.trim().to_ascii_lowercase()
}

// ── Loan agreements ──

const LOAN_ENTRIES: &[ChecklistEntry] = &[
    ChecklistEntry::builtin(
        "Effective Date",
        "When the loan is disbursed and interest begins to accrue.",
    ),
    ChecklistEntry::builtin(
        "Repayment Trigger",
        "The event that starts the repayment (e.g., '6 months after graduation').",
    ),
    ChecklistEntry::builtin(
        "Interest Rate / Profit Rate",
        "The cost of the loan (e.g., 1% for PTPTN, or 4-6% for banks).",
    ),
    ChecklistEntry::builtin(
        "Late Payment Penalty",
        "The 'Gharamah' or late fee (e.g., 1% per annum on the arrears).",
    ),
    ChecklistEntry::builtin(
        "Governing Law",
        "Legal jurisdiction (usually Laws of Malaysia).",
    ),
    ChecklistEntry::builtin(
        "Co-signer / Guarantor",
        "Who else is legally responsible if the student fails to pay.",
    ),
];

const LOAN_FOCUS: &[&str] = &[
    "Find the 'Repayment Start' condition (e.g., 6 months after grad).",
    "Check for 'Guarantor' requirements.",
    "Look for 'First Class Honours' or 'Excellence' waivers (Malaysian specific).",
];

// ── Insurance policies ──

const INSURANCE_ENTRIES: &[ChecklistEntry] = &[
    ChecklistEntry::builtin(
        "Effective Date",
        "When cover starts and the first premium is due.",
    ),
    ChecklistEntry::builtin(
        "Expiration Date",
        "When cover ends or must be renewed. Report it in date_found as YYYY-MM-DD.",
    ),
    ChecklistEntry::builtin(
        "Premium",
        "The amount payable and how often (monthly, yearly).",
    ),
    ChecklistEntry::builtin(
        "Exclusions",
        "Events or conditions the policy does not cover.",
    ),
    ChecklistEntry::builtin(
        "Cancellation / Termination",
        "How either party can end the policy and any refund or penalty.",
    ),
    ChecklistEntry::builtin(
        "Governing Law",
        "Legal jurisdiction (usually Laws of Malaysia).",
    ),
];

const INSURANCE_FOCUS: &[&str] = &[
    "Find the policy period and report the end date exactly as written.",
    "Check for a grace period on late premiums.",
    "Look for 'Takaful' wording and any Shariah-specific conditions (Malaysian specific).",
];

/// Categories whose `date_found` drives the expiry status.
const DATE_CATEGORIES: &[&str] = &["Expiration Date"];

/// Checklist content for one deployment: what the prompt asks for and which
/// categories carry an expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub name: String,
    /// How the prompt refers to the document, e.g. "Loan Agreement".
    pub document_label: String,
    /// Label reported alongside every result.
    pub benchmark: String,
    pub entries: Vec<ChecklistEntry>,
    /// Extra extraction instructions appended to the prompt.
    #[serde(default)]
    pub focus_points: Vec<String>,
    #[serde(default)]
    pub date_categories: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidChecklist {
    #[error("checklist {0:?} has no entries")]
    NoEntries(String),
    #[error("checklist entry {index} has an empty category")]
    EmptyCategory { index: usize },
    #[error("checklist category {0:?} appears more than once")]
    DuplicateCategory(String),
}

impl Checklist {
    /// Entries must be non-empty with unique, non-blank categories
    /// (compared by [`category_key`]).
    pub fn validate(&self) -> Result<(), InvalidChecklist> {
        if self.entries.is_empty() {
            return Err(InvalidChecklist::NoEntries(self.name.clone()));
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            let key = category_key(&entry.category);
            if key.is_empty() {
                return Err(InvalidChecklist::EmptyCategory { index });
            }
            if !seen.insert(key) {
                return Err(InvalidChecklist::DuplicateCategory(entry.category.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for Checklist {
    fn default() -> Self {
        ChecklistKind::default().checklist()
    }
}

impl From<ChecklistKind> for Checklist {
    fn from(kind: ChecklistKind) -> Self {
        kind.checklist()
    }
}

/// Built-in checklist variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    #[default]
    Loan,
    Insurance,
}

#[derive(Debug, Error)]
#[error("unknown checklist {0:?} (expected \"loan\" or \"insurance\")")]
pub struct UnknownChecklist(pub String);

impl ChecklistKind {
    pub const ALL: [ChecklistKind; 2] = [Self::Loan, Self::Insurance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Insurance => "insurance",
        }
    }

    /// Ordered checklist entries. Category names are unique within a variant.
    pub fn entries(&self) -> &'static [ChecklistEntry] {
        match self {
            Self::Loan => LOAN_ENTRIES,
            Self::Insurance => INSURANCE_ENTRIES,
        }
    }

    pub fn document_label(&self) -> &'static str {
        match self {
            Self::Loan => "Loan Agreement",
            Self::Insurance => "Insurance Policy",
        }
    }

    pub fn benchmark(&self) -> &'static str {
        match self {
            Self::Loan => "Cuad-v1 Standard",
            Self::Insurance => "Cuad-v1 Insurance",
        }
    }

    pub fn focus_points(&self) -> &'static [&'static str] {
        match self {
            Self::Loan => LOAN_FOCUS,
            Self::Insurance => INSURANCE_FOCUS,
        }
    }

    pub fn date_categories(&self) -> &'static [&'static str] {
        DATE_CATEGORIES
    }

    /// Owned [`Checklist`] for this variant.
    pub fn checklist(&self) -> Checklist {
        Checklist {
            name: self.as_str().to_string(),
            document_label: self.document_label().to_string(),
            benchmark: self.benchmark().to_string(),
            entries: self.entries().to_vec(),
            focus_points: self.focus_points().iter().map(|p| p.to_string()).collect(),
            date_categories: self.date_categories().iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistKind {
    type Err = UnknownChecklist;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loan" => Ok(Self::Loan),
            "insurance" => Ok(Self::Insurance),
            _ => Err(UnknownChecklist(s.to_string())),
        }
    }
}

/// The default (loan) checklist.
pub fn get_checklist() -> &'static [ChecklistEntry] {
    ChecklistKind::default().entries()
}

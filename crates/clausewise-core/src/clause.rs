//! Clause records as returned by the model, and their post-processed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Coarse severity label attached by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

/// A clause extracted by the inference service.
///
/// Only `category` and `clause` are required. The parser in `clausewise-ai`
/// is the trust boundary; everything downstream assumes this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseRecord {
    pub category: String,
    pub clause: String,
    #[serde(default)]
    pub explanation: String,
    /// `None` when the model omitted it or used a label outside Low/Medium/High.
    #[serde(
        default,
        deserialize_with = "lenient_risk_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_level: Option<RiskLevel>,
    /// ISO 8601 date (or timestamp) string, as written by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_found: Option<String>,
}

fn lenient_risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Lifecycle label derived during post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseStatus {
    /// Not date-bearing, or no usable date.
    Info,
    /// Date more than the urgent window away.
    Active,
    /// Date within the urgent window (inclusive of today).
    Urgent,
    /// Date already passed.
    Expired,
}

impl ClauseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Active => "ACTIVE",
            Self::Urgent => "URGENT",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for ClauseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deduplicated clause with its computed status.
///
/// Serialises flat: the record's fields followed by `status` and `warning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedClause {
    #[serde(flatten)]
    pub record: ClauseRecord,
    pub status: ClauseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ProcessedClause {
    pub fn info(record: ClauseRecord) -> Self {
        Self {
            record,
            status: ClauseStatus::Info,
            warning: None,
        }
    }

    pub fn category(&self) -> &str {
        &self.record.category
    }
}

//! Validation of raw model output into [`ClauseRecord`]s.
//!
//! This is the only place that looks at the model's reply as untrusted data.
//! Accepted: a JSON array (optionally inside one Markdown code fence) whose
//! elements are objects with non-empty string `category` and `clause` fields.
//! An empty array is a valid answer meaning "nothing found".

use clausewise_core::ClauseRecord;
use serde_json::Value;
use tracing::debug;

use crate::error::MalformedOutputError;

pub fn parse_clauses(raw_text: &str) -> Result<Vec<ClauseRecord>, MalformedOutputError> {
    let body = strip_code_fence(raw_text);
    let value: Value = serde_json::from_str(body).map_err(MalformedOutputError::NotJson)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(MalformedOutputError::NotArray {
                found: json_type(&other),
            });
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = records.len(), "parsed clause records");
    Ok(records)
}

fn parse_record(index: usize, item: Value) -> Result<ClauseRecord, MalformedOutputError> {
    let fields = match item {
        Value::Object(fields) => fields,
        other => {
            return Err(MalformedOutputError::NotObject {
                index,
                found: json_type(&other),
            });
        }
    };

    for field in ["category", "clause"] {
        let present = fields
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            return Err(MalformedOutputError::MissingField { index, field });
        }
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|source| MalformedOutputError::InvalidRecord { index, source })
}

/// Remove a single surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json"), whether or not a newline follows it.
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use clausewise_core::RiskLevel;

    use super::*;

    #[test]
    fn parses_clause_array() {
        let raw = r#"[
            {
                "category": "Interest Rate / Profit Rate",
                "clause": "Ujrah of 1% per annum",
                "explanation": "A 1% yearly service charge.",
                "risk_level": "Low"
            },
            {
                "category": "Expiration Date",
                "clause": "Cover ends on 1 March 2026",
                "explanation": "Policy end.",
                "risk_level": "High",
                "date_found": "2026-03-01"
            }
        ]"#;
        let records = parse_clauses(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].risk_level, Some(RiskLevel::Low));
        assert_eq!(records[1].date_found.as_deref(), Some("2026-03-01"));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_clauses("[]").unwrap().is_empty());
        assert!(parse_clauses("  [ ]\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_json() {
        let err = parse_clauses("I could not find any clauses.").unwrap_err();
        assert!(matches!(err, MalformedOutputError::NotJson(_)));
    }

    #[test]
    fn rejects_object() {
        let err = parse_clauses(r#"{"clauses": []}"#).unwrap_err();
        assert!(matches!(err, MalformedOutputError::NotArray { found: "object" }));
    }

    #[test]
    fn rejects_non_object_element() {
        let raw = r#"[{"category": "Governing Law", "clause": "Malaysia"}, "Premium"]"#;
        let err = parse_clauses(raw).unwrap_err();
        assert!(matches!(
            err,
            MalformedOutputError::NotObject {
                index: 1,
                found: "string"
            }
        ));
    }

    #[test]
    fn rejects_missing_category() {
        let err = parse_clauses(r#"[{"clause": "orphan clause"}]"#).unwrap_err();
        assert!(matches!(
            err,
            MalformedOutputError::MissingField {
                index: 0,
                field: "category"
            }
        ));
    }

    #[test]
    fn rejects_blank_clause() {
        let err = parse_clauses(r#"[{"category": "Premium", "clause": "  "}]"#).unwrap_err();
        assert!(matches!(
            err,
            MalformedOutputError::MissingField { field: "clause", .. }
        ));
    }

    #[test]
    fn rejects_wrongly_typed_field() {
        let raw = r#"[{"category": "Premium", "clause": "RM 50", "explanation": 7}]"#;
        let err = parse_clauses(raw).unwrap_err();
        assert!(matches!(err, MalformedOutputError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn strips_markdown_fence() {
        let raw = "```json\n[{\"category\": \"Governing Law\", \"clause\": \"Malaysia\"}]\n```";
        let records = parse_clauses(raw).unwrap();
        assert_eq!(records[0].category, "Governing Law");
    }

    #[test]
    fn strips_single_line_fence() {
        let raw = "```json [{\"category\": \"Governing Law\", \"clause\": \"Malaysia\"}]```";
        let records = parse_clauses(raw).unwrap();
        assert_eq!(records[0].category, "Governing Law");

        assert!(parse_clauses("```[]```").unwrap().is_empty());
        assert!(parse_clauses("```JSON\n[]\n```").unwrap().is_empty());
    }

    #[test]
    fn unterminated_fence_is_not_json() {
        let err = parse_clauses("```json\n[]").unwrap_err();
        assert!(matches!(err, MalformedOutputError::NotJson(_)));
    }
}

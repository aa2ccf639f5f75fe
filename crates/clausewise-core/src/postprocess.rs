//! Deterministic post-processing of model output.
//!
//! Two passes over the validated records:
//!
//! 1. Deduplicate by category. The first record seen for a category is kept
//!    as-is; later records with the same category are discarded, not merged.
//!    Output order is the order of first occurrence. Categories compare by
//!    [`category_key`], the same key used for date-category matching.
//! 2. Annotate status. Records in a date-bearing category with a parseable
//!    `date_found` get `EXPIRED` / `URGENT` / `ACTIVE` from the whole-day
//!    distance to `today`; everything else is `INFO`.
//!
//! First-wins drops a later duplicate even when it carries a usable date that
//! the first lacked. Callers relying on that date should send one record per
//! category.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::checklist::{Checklist, category_key};
use crate::clause::{ClauseRecord, ClauseStatus, ProcessedClause};

/// Days-until-date at or below which a clause is `URGENT` (inclusive).
pub const URGENT_WINDOW_DAYS: i64 = 60;

const SECONDS_PER_DAY: i64 = 86_400;

/// Post-processing rules: which categories are date-bearing and how close a
/// date must be to count as urgent.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    /// Date-bearing categories, stored as [`category_key`]s.
    date_keys: HashSet<String>,
    urgent_window_days: i64,
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::for_checklist(&Checklist::default())
    }
}

impl PostProcessor {
    pub fn new(date_categories: Vec<String>, urgent_window_days: i64) -> Self {
        Self {
            date_keys: date_categories.iter().map(|c| category_key(c)).collect(),
            urgent_window_days,
        }
    }

    /// Rules for a checklist, with the standard 60-day window.
    pub fn for_checklist(checklist: &Checklist) -> Self {
        Self::new(checklist.date_categories.clone(), URGENT_WINDOW_DAYS)
    }

    /// Deduplicate and annotate `clauses` relative to `today`.
    ///
    /// Pure: the same input and `today` always produce the same output.
    pub fn process(&self, clauses: Vec<ClauseRecord>, today: NaiveDate) -> Vec<ProcessedClause> {
        let input_len = clauses.len();
        let unique = dedup_by_category(clauses);
        if unique.len() < input_len {
            debug!(
                dropped = input_len - unique.len(),
                kept = unique.len(),
                "discarded duplicate categories"
            );
        }
        unique
            .into_iter()
            .map(|record| self.annotate(record, today))
            .collect()
    }

    fn is_date_bearing(&self, category: &str) -> bool {
        self.date_keys.contains(&category_key(category))
    }

    fn annotate(&self, record: ClauseRecord, today: NaiveDate) -> ProcessedClause {
        if !self.is_date_bearing(&record.category) {
            return ProcessedClause::info(record);
        }
        let Some(date) = record.date_found.as_deref().and_then(parse_date_found) else {
            return ProcessedClause::info(record);
        };

        let diff = days_until(date, today);
        let (status, warning) = if diff < 0 {
            (ClauseStatus::Expired, Some("Policy ended.".to_string()))
        } else if diff <= self.urgent_window_days {
            (ClauseStatus::Urgent, Some(format!("Ends in {diff} days!")))
        } else {
            (ClauseStatus::Active, None)
        };

        ProcessedClause {
            record,
            status,
            warning,
        }
    }
}

/// [`PostProcessor::process`] with the default rules.
pub fn process(clauses: Vec<ClauseRecord>, today: NaiveDate) -> Vec<ProcessedClause> {
    PostProcessor::default().process(clauses, today)
}

fn dedup_by_category(clauses: Vec<ClauseRecord>) -> Vec<ClauseRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(clauses.len());
    clauses
        .into_iter()
        .filter(|c| seen.insert(category_key(&c.category)))
        .collect()
}

/// `ceil((date - today) / 1 day)`, with `today` taken at midnight.
fn days_until(date: NaiveDateTime, today: NaiveDate) -> i64 {
    let secs = (date - today.and_time(NaiveTime::MIN)).num_seconds();
    let whole = secs.div_euclid(SECONDS_PER_DAY);
    if secs.rem_euclid(SECONDS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
fn parse_date_found(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::clause::RiskLevel;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
    }

    fn record(category: &str, clause: &str) -> ClauseRecord {
        ClauseRecord {
            category: category.into(),
            clause: clause.into(),
            explanation: format!("about {clause}"),
            risk_level: Some(RiskLevel::Low),
            date_found: None,
        }
    }

    fn expiring_in(days: i64) -> ClauseRecord {
        let date = if days >= 0 {
            today() + Days::new(days as u64)
        } else {
            today() - Days::new(days.unsigned_abs())
        };
        ClauseRecord {
            date_found: Some(date.format("%Y-%m-%d").to_string()),
            ..record("Expiration Date", "cover ends")
        }
    }

    #[test]
    fn empty_input() {
        assert!(process(vec![], today()).is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let input = vec![
            record("Governing Law", "first"),
            record("Effective Date", "disbursed"),
            record("Governing Law", "second"),
        ];
        let out = process(input, today());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].record.clause, "first");
        assert_eq!(out[1].category(), "Effective Date");
    }

    #[test]
    fn order_follows_first_occurrence() {
        let input = vec![
            record("C", "1"),
            record("A", "2"),
            record("C", "3"),
            record("B", "4"),
            record("A", "5"),
        ];
        let categories: Vec<String> = process(input, today())
            .into_iter()
            .map(|c| c.record.category)
            .collect();
        assert_eq!(categories, ["C", "A", "B"]);
    }

    #[test]
    fn retained_record_is_unchanged() {
        let first = record("Late Payment Penalty", "1% per annum");
        let out = process(
            vec![first.clone(), record("Late Payment Penalty", "2%")],
            today(),
        );
        assert_eq!(out[0].record, first);
        assert_eq!(out[0].status, ClauseStatus::Info);
        assert!(out[0].warning.is_none());
    }

    #[test]
    fn deterministic() {
        let input = vec![
            expiring_in(10),
            record("Governing Law", "Malaysia"),
            expiring_in(400),
        ];
        let a = process(input.clone(), today());
        let b = process(input, today());
        assert_eq!(a, b);
    }

    #[test]
    fn boundary_sixty_days_is_urgent() {
        let out = process(vec![expiring_in(60)], today());
        assert_eq!(out[0].status, ClauseStatus::Urgent);
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 60 days!"));
    }

    #[test]
    fn boundary_sixty_one_days_is_active() {
        let out = process(vec![expiring_in(61)], today());
        assert_eq!(out[0].status, ClauseStatus::Active);
        assert!(out[0].warning.is_none());
    }

    #[test]
    fn boundary_today_is_urgent() {
        let out = process(vec![expiring_in(0)], today());
        assert_eq!(out[0].status, ClauseStatus::Urgent);
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 0 days!"));
    }

    #[test]
    fn boundary_yesterday_is_expired() {
        let out = process(vec![expiring_in(-1)], today());
        assert_eq!(out[0].status, ClauseStatus::Expired);
        assert_eq!(out[0].warning.as_deref(), Some("Policy ended."));
    }

    #[test]
    fn first_duplicate_wins_including_date() {
        let out = process(vec![expiring_in(10), expiring_in(400)], today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, ClauseStatus::Urgent);
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 10 days!"));
    }

    #[test]
    fn unparseable_date_stays_info() {
        let rec = ClauseRecord {
            date_found: Some("end of semester".into()),
            ..record("Expiration Date", "cover ends")
        };
        let out = process(vec![rec], today());
        assert_eq!(out[0].status, ClauseStatus::Info);
        assert!(out[0].warning.is_none());
    }

    #[test]
    fn missing_date_stays_info() {
        let out = process(vec![record("Expiration Date", "no date given")], today());
        assert_eq!(out[0].status, ClauseStatus::Info);
    }

    #[test]
    fn dates_ignored_outside_date_categories() {
        let rec = ClauseRecord {
            date_found: Some("2026-02-20".into()),
            ..record("Effective Date", "disbursed tomorrow")
        };
        let out = process(vec![rec], today());
        assert_eq!(out[0].status, ClauseStatus::Info);
    }

    #[test]
    fn date_category_match_ignores_case() {
        let rec = ClauseRecord {
            category: " expiration date".into(),
            ..expiring_in(5)
        };
        let out = process(vec![rec], today());
        assert_eq!(out[0].status, ClauseStatus::Urgent);
    }

    #[test]
    fn timestamp_rounds_up_partial_days() {
        // 1.5 days ahead rounds up to 2.
        let rec = ClauseRecord {
            date_found: Some("2026-02-20T12:00:00Z".into()),
            ..record("Expiration Date", "ends at noon")
        };
        let out = process(vec![rec], today());
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 2 days!"));
    }

    #[test]
    fn timestamp_earlier_today_is_zero_days() {
        // -0.5 days rounds up to 0, still urgent rather than expired.
        let rec = ClauseRecord {
            date_found: Some("2026-02-18T12:00:00".into()),
            ..record("Expiration Date", "ended yesterday noon")
        };
        let out = process(vec![rec], today());
        assert_eq!(out[0].status, ClauseStatus::Urgent);
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 0 days!"));
    }

    #[test]
    fn dedup_uses_the_date_matching_key() {
        let later = ClauseRecord {
            category: "expiration date ".into(),
            ..expiring_in(400)
        };
        let out = process(vec![expiring_in(10), later], today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category(), "Expiration Date");
        assert_eq!(out[0].status, ClauseStatus::Urgent);
        assert_eq!(out[0].warning.as_deref(), Some("Ends in 10 days!"));
    }

    #[test]
    fn dedup_keeps_first_spelling() {
        let out = process(
            vec![record(" governing law", "first"), record("Governing Law", "second")],
            today(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category(), " governing law");
        assert_eq!(out[0].record.clause, "first");
    }

    #[test]
    fn custom_window() {
        let rules = PostProcessor::new(vec!["Renewal Date".into()], 30);
        let rec = ClauseRecord {
            category: "Renewal Date".into(),
            ..expiring_in(45)
        };
        let out = rules.process(vec![rec], today());
        assert_eq!(out[0].status, ClauseStatus::Active);
    }
}

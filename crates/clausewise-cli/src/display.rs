//! Plain-text rendering of analysis results and checklists.
//!
//! Each clause becomes a small card: category header, status and risk,
//! the quoted clause, then the explanation and any expiry warning.

use std::fmt::Write;

use clausewise_core::{AnalysisResult, Checklist, ClauseStatus, ProcessedClause};

const MAX_QUOTE_CHARS: usize = 400;

// ── Public API ──

pub fn format_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", result.filename);
    let _ = writeln!(out, "Benchmark: {}", result.benchmark);

    if result.clauses.is_empty() {
        let _ = writeln!(out, "No checklist clauses found.");
        return out;
    }

    let flagged = result
        .clauses
        .iter()
        .filter(|c| matches!(c.status, ClauseStatus::Urgent | ClauseStatus::Expired))
        .count();
    let _ = writeln!(out, "{} clauses, {} need attention", result.clauses.len(), flagged);

    for clause in &result.clauses {
        out.push('\n');
        write_clause(&mut out, clause);
    }
    out
}

pub fn format_checklist(checklist: &Checklist) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {})",
        checklist.name, checklist.document_label, checklist.benchmark
    );
    for (i, entry) in checklist.entries.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {:<28} {}", i + 1, entry.category, entry.hint);
    }
    if !checklist.date_categories.is_empty() {
        let _ = writeln!(out, "Dated: {}", checklist.date_categories.join(", "));
    }
    out
}

// ── Cards ──

fn write_clause(out: &mut String, clause: &ProcessedClause) {
    let record = &clause.record;
    let mut header = format!("── {} ── [{}]", record.category, clause.status);
    if let Some(risk) = record.risk_level {
        let _ = write!(header, " {risk} risk");
    }
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "  \"{}\"", truncate(&record.clause, MAX_QUOTE_CHARS));
    if !record.explanation.is_empty() {
        let _ = writeln!(out, "  {}", record.explanation);
    }
    if let Some(date) = &record.date_found {
        let _ = writeln!(out, "  Date: {date}");
    }
    if let Some(warning) = &clause.warning {
        let _ = writeln!(out, "  ! {warning}");
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

//! Prompt templates for clause extraction.

use clausewise_core::{Checklist, ChecklistEntry};

/// Character budget for the document excerpt embedded in the prompt.
pub const MAX_DOCUMENT_CHARS: usize = 15_000;

pub const SYSTEM_INSTRUCTION: &str = "\
You are a legal auditor. Extract clauses based on the CUAD (Contract Understanding Atticus Dataset) \
standard. Be precise with dates and jurisdiction.";

const OUTPUT_FORMAT: &str = "\
FORMAT: Return a JSON array of objects with \"category\", \"clause\", \"explanation\", \
\"risk_level\" (Low, Medium, High) and \"date_found\" (YYYY-MM-DD, or null when the clause states no date). \
Use the checklist category names exactly. Return an empty array if nothing applies.";

/// Build the user prompt for one document.
///
/// The document text is cut to its first [`MAX_DOCUMENT_CHARS`] characters.
/// The focus block is left out when the checklist has no focus points.
pub fn build_prompt(document_text: &str, checklist: &Checklist) -> String {
    let excerpt = truncate_chars(document_text, MAX_DOCUMENT_CHARS);
    let focus = if checklist.focus_points.is_empty() {
        String::new()
    } else {
        let points = checklist
            .focus_points
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("ADDITIONAL CRITICAL DATA:\n{points}\n\n")
    };

    format!(
        "You are a Financial Literacy Expert for Students.\n\
         Analyze this {document} using the CUAD-inspired checklist:\n\
         {entries}\n\
         \n\
         {focus}\
         {OUTPUT_FORMAT}\n\
         \n\
         TEXT: {excerpt}",
        document = checklist.document_label,
        entries = render_checklist(&checklist.entries),
    )
}

/// One `- <category>: <hint>` line per entry.
pub fn render_checklist(entries: &[ChecklistEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("- {}: {}", e.category, e.hint))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use clausewise_core::ChecklistKind;

    use super::*;

    fn loan() -> Checklist {
        ChecklistKind::Loan.checklist()
    }

    fn excerpt(prompt: &str) -> &str {
        prompt.split_once("TEXT: ").map(|(_, t)| t).unwrap()
    }

    #[test]
    fn renders_checklist_bullets() {
        let prompt = build_prompt("some text", &loan());
        assert!(prompt.contains(
            "- Effective Date: When the loan is disbursed and interest begins to accrue.\n\
             - Repayment Trigger:"
        ));
        assert!(prompt.contains("- Co-signer / Guarantor: Who else is legally responsible"));
        assert!(prompt.contains("First Class Honours"));
    }

    #[test]
    fn states_output_shape() {
        let prompt = build_prompt("", &ChecklistKind::Insurance.checklist());
        for field in ["\"category\"", "\"clause\"", "\"explanation\"", "\"risk_level\"", "\"date_found\""] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("Insurance Policy"));
        assert!(prompt.contains("- Expiration Date:"));
    }

    #[test]
    fn empty_text_still_builds() {
        let prompt = build_prompt("", &loan());
        assert_eq!(excerpt(&prompt), "");
    }

    #[test]
    fn short_text_embedded_whole() {
        let prompt = build_prompt("The borrower shall repay.", &loan());
        assert_eq!(excerpt(&prompt), "The borrower shall repay.");
    }

    #[test]
    fn long_text_truncated_to_budget() {
        let text = "a".repeat(MAX_DOCUMENT_CHARS) + &"b".repeat(500);
        let prompt = build_prompt(&text, &loan());
        let embedded = excerpt(&prompt);
        assert_eq!(embedded.chars().count(), MAX_DOCUMENT_CHARS);
        assert!(!embedded.contains('b'));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut, "éééé");
        assert_eq!(cut.len(), 8);
    }

    #[test]
    fn custom_checklist_drives_prompt() {
        let checklist = Checklist {
            name: "tenancy".into(),
            document_label: "Tenancy Agreement".into(),
            benchmark: "Tenancy v1".into(),
            entries: vec![
                ChecklistEntry::new("Deposit", "Amount held and refund terms."),
                ChecklistEntry::new("Lease End", "When the tenancy ends."),
            ],
            focus_points: vec![],
            date_categories: vec!["Lease End".into()],
        };
        let prompt = build_prompt("The deposit is two months' rent.", &checklist);

        assert!(prompt.contains("Analyze this Tenancy Agreement"));
        assert!(prompt.contains(
            "- Deposit: Amount held and refund terms.\n- Lease End: When the tenancy ends.\n"
        ));
        assert!(!prompt.contains("ADDITIONAL CRITICAL DATA"));
        assert!(!prompt.contains("Effective Date"));
        assert_eq!(excerpt(&prompt), "The deposit is two months' rent.");
    }

    #[test]
    fn focus_points_listed_when_present() {
        let prompt = build_prompt("text", &loan());
        assert!(prompt.contains("ADDITIONAL CRITICAL DATA:\n- Find the 'Repayment Start'"));
    }

    #[test]
    fn deterministic() {
        let a = build_prompt("clause text", &loan());
        let b = build_prompt("clause text", &loan());
        assert_eq!(a, b);
    }
}

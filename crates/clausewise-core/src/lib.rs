pub mod checklist;
pub mod clause;
pub mod postprocess;
pub mod result;

pub use checklist::{
    Checklist, ChecklistEntry, ChecklistKind, InvalidChecklist, UnknownChecklist, category_key,
    get_checklist,
};
pub use clause::{ClauseRecord, ClauseStatus, ProcessedClause, RiskLevel};
pub use postprocess::{PostProcessor, URGENT_WINDOW_DAYS, process};
pub use result::{AnalysisResult, ErrorEnvelope, ResultStatus, assemble};

use clausewise_ai::inference::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use clausewise_ai::{InferenceRequest, SYSTEM_INSTRUCTION};
use clausewise_core::{Checklist, ChecklistKind};

/// Pipeline settings, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Prompt content, date-bearing categories and the reported benchmark.
    pub checklist: Checklist,
    pub system_instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new(Checklist::default())
    }
}

impl AnalyzerConfig {
    pub fn new(checklist: Checklist) -> Self {
        Self {
            checklist,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Settings for one of the built-in checklists.
    pub fn for_checklist(kind: ChecklistKind) -> Self {
        Self::new(kind.checklist())
    }

    pub(crate) fn inference_request(&self, prompt: String) -> InferenceRequest {
        InferenceRequest::structured(self.system_instruction.clone(), prompt)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens)
    }
}

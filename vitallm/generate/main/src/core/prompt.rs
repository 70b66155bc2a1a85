//! Prompt composition for single-turn chat.

/// Default instruction of the medical assistant deployment.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional Medical Assistant with deep expertise in \
clinical reasoning and evidence-based medicine. Provide clear, accurate, and compassionate information. \
Always recommend consulting a licensed physician for diagnosis and treatment.";

/// Speaker labels wrapped around the user turn.
///
/// The composed prompt only carries the latest user message; earlier turns
/// of a conversation are not part of the model input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub role_label: String,
    pub assistant_label: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            role_label: "Patient".into(),
            assistant_label: "Doctor".into(),
        }
    }
}

impl PromptTemplate {
    pub fn new(role_label: impl Into<String>, assistant_label: impl Into<String>) -> Self {
        Self {
            role_label: role_label.into(),
            assistant_label: assistant_label.into(),
        }
    }

    /// `"{system}\n\n{role}: {message}\n{assistant}:"`. An empty system
    /// message is kept as-is.
    pub fn compose(&self, system: &str, message: &str) -> String {
        format!(
            "{}\n\n{}: {}\n{}:",
            system, self.role_label, message, self.assistant_label
        )
    }
}

/// Compose with the default `Patient`/`Doctor` labels.
pub fn compose_prompt(system: &str, message: &str) -> String {
    PromptTemplate::default().compose(system, message)
}

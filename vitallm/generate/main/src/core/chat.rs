//! In-memory chat transcript driving single-turn generations.

use rand::Rng;

use crate::api::error::{GenerateError, GenerateResult};
use crate::api::types::{ChatMessage, GenerationConfig, GenerationStatus, Role};
use crate::core::cancel::CancelToken;
use crate::core::generator::Generator;
use crate::core::prompt::{DEFAULT_SYSTEM_PROMPT, PromptTemplate};

/// One chat conversation. Nothing is persisted beyond the value itself.
///
/// The transcript is shown to the user in full, but each reply is conditioned
/// only on the system prompt and the latest user message.
#[derive(Debug, Clone)]
pub struct ChatSession {
    system_prompt: String,
    template: PromptTemplate,
    config: GenerationConfig,
    history: Vec<ChatMessage>,
    /// The last assistant turn is still waiting for its reply.
    awaiting_reply: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            template: PromptTemplate::default(),
            config: GenerationConfig::default(),
            history: Vec::new(),
            awaiting_reply: false,
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_system_prompt(&mut self, system_prompt: impl Into<String>) {
        self.system_prompt = system_prompt.into();
    }

    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Append a user turn and an empty assistant turn for the reply.
    pub fn submit(&mut self, user_message: impl Into<String>) {
        self.history.push(ChatMessage::user(user_message));
        self.history.push(ChatMessage::assistant(String::new()));
        self.awaiting_reply = true;
    }

    /// Prompt the pending reply will be generated from.
    pub fn pending_prompt(&self) -> GenerateResult<String> {
        let user = self.pending_user_message()?;
        Ok(self.template.compose(&self.system_prompt, user))
    }

    /// Generate the pending assistant turn.
    pub fn reply<R: Rng>(&mut self, generator: &Generator<'_>, rng: R) -> GenerateResult<GenerationStatus> {
        self.reply_with(generator, rng, |_| true)
    }

    /// Generate the pending assistant turn, overwriting it with each
    /// cumulative output and passing that text to `on_update`. Returning
    /// `false` from `on_update` cancels at the next checkpoint.
    ///
    /// On error the empty-or-partial assistant turn is removed and the user
    /// turn is kept.
    pub fn reply_with<R, F>(
        &mut self,
        generator: &Generator<'_>,
        rng: R,
        mut on_update: F,
    ) -> GenerateResult<GenerationStatus>
    where
        R: Rng,
        F: FnMut(&str) -> bool,
    {
        let prompt = self.pending_prompt()?;
        let cancel = CancelToken::new();
        let mut generation =
            match generator.generate_with_cancel(&prompt, &self.config, rng, cancel.clone()) {
                Ok(generation) => generation,
                Err(e) => {
                    self.history.pop();
                    self.awaiting_reply = false;
                    return Err(e);
                }
            };

        for item in generation.by_ref() {
            let text = match item {
                Ok(text) => text,
                Err(e) => {
                    self.history.pop();
                    self.awaiting_reply = false;
                    return Err(e);
                }
            };
            let keep_going = on_update(&text);
            if let Some(last) = self.history.last_mut() {
                last.content = text;
            }
            if !keep_going {
                cancel.cancel();
            }
        }
        self.awaiting_reply = false;
        Ok(generation.status())
    }

    /// Drop the whole transcript.
    pub fn clear(&mut self) {
        self.history.clear();
        self.awaiting_reply = false;
    }

    fn pending_user_message(&self) -> GenerateResult<&str> {
        match self.history.as_slice() {
            [.., user, reply]
                if self.awaiting_reply
                    && user.role == Role::User
                    && reply.role == Role::Assistant =>
            {
                Ok(&user.content)
            }
            _ => Err(GenerateError::Config(
                "no pending user turn; call submit() first".into(),
            )),
        }
    }
}

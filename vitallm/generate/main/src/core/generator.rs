//! Autoregressive decode loop with cumulative-text streaming.
//!
//! Works with any `SequenceModel` implementation and any `Tokenizer`
//! implementation (ByteTokenizer, HFTokenizer, etc.).

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use vitallm_tokenizer::Tokenizer;

use crate::api::error::{GenerateError, GenerateResult};
use crate::api::traits::SequenceModel;
use crate::api::types::{GenerationConfig, GenerationOutput, GenerationStatus};
use crate::core::cancel::CancelToken;
use crate::core::context::ContextWindow;
use crate::core::sampling;

/// Entry point for generation calls against one model/tokenizer pair.
///
/// Both collaborators are constructed once by the application and borrowed
/// here; a `Generator` holds no mutable state, so any number of generations
/// may run from it concurrently.
#[derive(Clone, Copy)]
pub struct Generator<'a> {
    model: &'a dyn SequenceModel,
    tokenizer: &'a (dyn Tokenizer + Sync),
}

impl<'a> Generator<'a> {
    pub fn new(model: &'a dyn SequenceModel, tokenizer: &'a (dyn Tokenizer + Sync)) -> Self {
        Self { model, tokenizer }
    }

    pub fn model(&self) -> &'a dyn SequenceModel {
        self.model
    }

    pub fn tokenizer(&self) -> &'a (dyn Tokenizer + Sync) {
        self.tokenizer
    }

    /// Start a generation. Nothing runs until the returned iterator is polled.
    pub fn generate<R: Rng>(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        rng: R,
    ) -> GenerateResult<Generation<'a, R>> {
        self.generate_with_cancel(prompt, config, rng, CancelToken::new())
    }

    /// Start a generation that stops at the first checkpoint after `cancel` fires.
    pub fn generate_with_cancel<R: Rng>(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        rng: R,
        cancel: CancelToken,
    ) -> GenerateResult<Generation<'a, R>> {
        config.validate()?;
        let prompt_tokens = self.tokenizer.encode(prompt)?;
        if prompt_tokens.is_empty() {
            return Err(GenerateError::Config("prompt encodes to zero tokens".into()));
        }
        let window = ContextWindow::from_tokens(self.model.block_size(), &prompt_tokens)?;

        log::debug!(
            "generation start: prompt_tokens={} block_size={} max_new_tokens={} temperature={} top_k={}",
            prompt_tokens.len(),
            window.block_size(),
            config.max_new_tokens,
            config.temperature,
            config.top_k
        );

        Ok(Generation {
            model: self.model,
            tokenizer: self.tokenizer,
            config: *config,
            eos_token_id: self.tokenizer.eos_token_id(),
            rng,
            cancel,
            state: GenerationState::new(window),
        })
    }

    /// Run a generation to completion and return the final text.
    pub fn generate_text<R: Rng>(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        rng: R,
    ) -> GenerateResult<GenerationOutput> {
        self.generate(prompt, config, rng)?.collect_text()
    }

    /// Generate completions for multiple prompts in parallel using rayon.
    ///
    /// Prompt `i` samples from `StdRng::seed_from_u64(seed + i)`, so the
    /// results do not depend on scheduling.
    pub fn generate_batch_parallel(
        &self,
        prompts: &[&str],
        config: &GenerationConfig,
        seed: u64,
    ) -> GenerateResult<Vec<GenerationOutput>> {
        prompts
            .par_iter()
            .enumerate()
            .map(|(i, prompt)| {
                let rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                self.generate_text(prompt, config, rng)
            })
            .collect()
    }
}

/// Call-local mutable state of one generation.
#[derive(Debug, Clone)]
pub struct GenerationState {
    window: ContextWindow,
    generated: Vec<u32>,
    text: String,
    steps: usize,
    status: GenerationStatus,
}

impl GenerationState {
    fn new(window: ContextWindow) -> Self {
        Self {
            window,
            generated: Vec::new(),
            text: String::new(),
            steps: 0,
            status: GenerationStatus::Running,
        }
    }

    pub fn window(&self) -> &ContextWindow {
        &self.window
    }

    pub fn generated_tokens(&self) -> &[u32] {
        &self.generated
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }
}

/// One in-flight generation.
///
/// Each item is the cumulative decoded text so far, so item `n` always
/// extends item `n - 1`. The iterator is finite and one-shot: once it yields
/// `None` (or an error), [`status`](Self::status) holds the terminal state
/// and further polling yields `None`.
pub struct Generation<'a, R: Rng> {
    model: &'a dyn SequenceModel,
    tokenizer: &'a (dyn Tokenizer + Sync),
    config: GenerationConfig,
    eos_token_id: Option<u32>,
    rng: R,
    cancel: CancelToken,
    state: GenerationState,
}

impl<'a, R: Rng> Generation<'a, R> {
    pub fn status(&self) -> GenerationStatus {
        self.state.status
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn generated_tokens(&self) -> &[u32] {
        &self.state.generated
    }

    pub fn steps(&self) -> usize {
        self.state.steps
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Handle for cancelling this generation from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Drain the generation and return the final text, tokens and status.
    pub fn collect_text(mut self) -> GenerateResult<GenerationOutput> {
        for item in self.by_ref() {
            item?;
        }
        Ok(GenerationOutput {
            text: self.state.text,
            tokens: self.state.generated,
            status: self.state.status,
        })
    }

    fn finish(&mut self, status: GenerationStatus) {
        self.state.status = status;
        log::debug!(
            "generation finished: {:?} after {} tokens ({} bytes of text)",
            status,
            self.state.steps,
            self.state.text.len()
        );
    }

    fn step(&mut self) -> GenerateResult<Option<String>> {
        if self.cancel.is_cancelled() {
            self.finish(GenerationStatus::DoneCancelled);
            return Ok(None);
        }

        let _t = if log::log_enabled!(log::Level::Trace) { Some(Instant::now()) } else { None };

        let context = self.state.window.conditioning_slice();
        let context_len = context.len();
        let mut logits = self.model.forward(context)?;
        let vocab_size = self.model.vocab_size();
        if logits.len() != vocab_size {
            return Err(GenerateError::Model(format!(
                "expected {} logits, got {}",
                vocab_size,
                logits.len()
            )));
        }

        let token = sampling::sample_in_place(
            &mut logits,
            self.config.temperature,
            self.config.top_k,
            &mut self.rng,
        )?;
        self.state.window.advance(token);
        self.state.generated.push(token);
        self.state.steps += 1;

        if self.eos_token_id == Some(token) {
            self.finish(GenerationStatus::DoneEos);
            return Ok(None);
        }

        let piece = self.tokenizer.decode(&[token])?;
        self.state.text.push_str(&piece);

        if let Some(t) = _t {
            log::trace!(
                "[perf] generate::step {} context={} token={} {:.3}ms",
                self.state.steps,
                context_len,
                token,
                t.elapsed().as_secs_f64() * 1000.0
            );
        }

        if self.state.steps >= self.config.max_new_tokens {
            self.finish(GenerationStatus::DoneMaxTokens);
        }
        Ok(Some(self.state.text.clone()))
    }
}

impl<R: Rng> Iterator for Generation<'_, R> {
    type Item = GenerateResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.status.is_terminal() {
            return None;
        }
        match self.step() {
            Ok(Some(text)) => Some(Ok(text)),
            Ok(None) => None,
            Err(e) => {
                log::debug!("generation failed at step {}: {}", self.state.steps + 1, e);
                self.state.status = GenerationStatus::Failed;
                Some(Err(e))
            }
        }
    }
}

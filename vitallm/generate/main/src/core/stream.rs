//! Producer-thread streaming over a channel.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use rand::SeedableRng;
use rand::rngs::StdRng;
use vitallm_tokenizer::Tokenizer;

use crate::api::error::{GenerateError, GenerateResult};
use crate::api::traits::SequenceModel;
use crate::api::types::{GenerationConfig, GenerationStatus};
use crate::core::cancel::CancelToken;
use crate::core::generator::Generator;

/// Message pushed by the producer thread.
#[derive(Debug)]
pub enum StreamEvent {
    /// Cumulative decoded text after one more token.
    Text(String),
    /// Generation reached a terminal state; no further events follow.
    Finished(GenerationStatus),
    /// Generation aborted; no further events follow.
    Failed(GenerateError),
}

/// Consumer side of a streamed generation.
///
/// Iterating yields events until the producer finishes. Dropping the handle
/// (or calling [`cancel`](Self::cancel)) stops the producer at its next
/// checkpoint.
pub struct StreamHandle {
    events: Receiver<StreamEvent>,
    cancel: CancelToken,
    worker: JoinHandle<()>,
}

impl StreamHandle {
    pub fn events(&self) -> &Receiver<StreamEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the producer thread to exit.
    pub fn join(self) -> GenerateResult<()> {
        let StreamHandle { events, worker, .. } = self;
        drop(events);
        worker
            .join()
            .map_err(|_| GenerateError::Worker("generation thread panicked".into()))
    }
}

impl Iterator for StreamHandle {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        self.events.recv().ok()
    }
}

/// Run a generation on a dedicated thread, pushing every cumulative output
/// onto a channel.
///
/// The config is validated before the thread starts. Sampling uses
/// `StdRng::seed_from_u64(seed)`.
pub fn spawn_stream<M, T>(
    model: Arc<M>,
    tokenizer: Arc<T>,
    prompt: impl Into<String>,
    config: GenerationConfig,
    seed: u64,
) -> GenerateResult<StreamHandle>
where
    M: SequenceModel + 'static,
    T: Tokenizer + Send + Sync + 'static,
{
    config.validate()?;
    let prompt = prompt.into();
    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();
    let producer_cancel = cancel.clone();

    let worker = thread::Builder::new()
        .name("vitallm-generate".into())
        .spawn(move || {
            produce(&*model, &*tokenizer, &prompt, &config, seed, producer_cancel, &tx)
        })?;

    Ok(StreamHandle {
        events: rx,
        cancel,
        worker,
    })
}

fn produce(
    model: &dyn SequenceModel,
    tokenizer: &(dyn Tokenizer + Sync),
    prompt: &str,
    config: &GenerationConfig,
    seed: u64,
    cancel: CancelToken,
    tx: &Sender<StreamEvent>,
) {
    let generator = Generator::new(model, tokenizer);
    let rng = StdRng::seed_from_u64(seed);
    let mut generation = match generator.generate_with_cancel(prompt, config, rng, cancel.clone()) {
        Ok(g) => g,
        Err(e) => {
            let _ = tx.send(StreamEvent::Failed(e));
            return;
        }
    };

    for item in generation.by_ref() {
        match item {
            Ok(text) => {
                if tx.send(StreamEvent::Text(text)).is_err() {
                    log::debug!("stream consumer went away; cancelling");
                    cancel.cancel();
                }
            }
            Err(e) => {
                let _ = tx.send(StreamEvent::Failed(e));
                return;
            }
        }
    }
    let _ = tx.send(StreamEvent::Finished(generation.status()));
}

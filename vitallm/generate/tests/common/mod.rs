#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use vitallm_generate::{GenerateError, GenerateResult, SequenceModel};
use vitallm_tokenizer::ByteTokenizer;

pub const EOS: u32 = 0;
pub const VOCAB: usize = 256;

/// Byte tokenizer whose eos is byte 0.
pub fn tokenizer() -> ByteTokenizer {
    ByteTokenizer::new().with_eos(EOS)
}

/// Logits with one dominant entry.
pub fn peaked(vocab: usize, favorite: u32) -> Vec<f32> {
    let mut logits = vec![0.0; vocab];
    logits[favorite as usize] = 30.0;
    logits
}

/// Emits `script[n]` on the n-th call (the last entry repeats) and records
/// every context it is given.
pub struct ScriptedModel {
    script: Vec<u32>,
    block_size: usize,
    calls: AtomicUsize,
    contexts: Mutex<Vec<Vec<u32>>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new(script: &[u8], block_size: usize) -> Self {
        Self::from_ids(script.iter().map(|&b| b as u32).collect(), block_size)
    }

    pub fn from_ids(script: Vec<u32>, block_size: usize) -> Self {
        assert!(!script.is_empty());
        Self {
            script,
            block_size,
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep this long inside every forward call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contexts(&self) -> Vec<Vec<u32>> {
        self.contexts.lock().unwrap().clone()
    }
}

impl SequenceModel for ScriptedModel {
    fn forward(&self, token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(token_ids.to_vec());
        let favorite = self.script[n.min(self.script.len() - 1)];
        Ok(peaked(VOCAB, favorite))
    }
    fn block_size(&self) -> usize {
        self.block_size
    }
    fn vocab_size(&self) -> usize {
        VOCAB
    }
}

/// Predicts the byte after the last context byte, wrapping inside `a..=z`.
/// Pure function of its input, so it can be shared freely.
pub struct SuccessorModel;

impl SequenceModel for SuccessorModel {
    fn forward(&self, token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        let last = *token_ids.last().unwrap();
        let next = if (b'a' as u32..b'z' as u32).contains(&last) { last + 1 } else { b'a' as u32 };
        Ok(peaked(VOCAB, next))
    }
    fn block_size(&self) -> usize {
        16
    }
    fn vocab_size(&self) -> usize {
        VOCAB
    }
}

/// Flat-ish logits over printable bytes so sampling is genuinely random.
pub struct NoisyModel;

impl SequenceModel for NoisyModel {
    fn forward(&self, token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        let seed = token_ids.len() as f32;
        let mut logits = vec![f32::NEG_INFINITY; VOCAB];
        for b in b'a'..=b'z' {
            logits[b as usize] = ((b as f32) * 0.7 + seed).sin();
        }
        Ok(logits)
    }
    fn block_size(&self) -> usize {
        32
    }
    fn vocab_size(&self) -> usize {
        VOCAB
    }
}

/// Succeeds `ok_calls` times, then fails.
pub struct FailingModel {
    ok_calls: usize,
    calls: AtomicUsize,
}

impl FailingModel {
    pub fn new(ok_calls: usize) -> Self {
        Self {
            ok_calls,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SequenceModel for FailingModel {
    fn forward(&self, _token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n >= self.ok_calls {
            return Err(GenerateError::Model("weights unavailable".into()));
        }
        Ok(peaked(VOCAB, b'x' as u32))
    }
    fn block_size(&self) -> usize {
        16
    }
    fn vocab_size(&self) -> usize {
        VOCAB
    }
}

/// Reports one vocabulary size but returns another.
pub struct WrongLengthModel;

impl SequenceModel for WrongLengthModel {
    fn forward(&self, _token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        Ok(vec![0.0; VOCAB - 1])
    }
    fn block_size(&self) -> usize {
        16
    }
    fn vocab_size(&self) -> usize {
        VOCAB
    }
}

/// Vocabulary larger than the byte tokenizer can decode; always picks 300.
pub struct WideVocabModel;

impl SequenceModel for WideVocabModel {
    fn forward(&self, _token_ids: &[u32]) -> GenerateResult<Vec<f32>> {
        Ok(peaked(512, 300))
    }
    fn block_size(&self) -> usize {
        16
    }
    fn vocab_size(&self) -> usize {
        512
    }
}

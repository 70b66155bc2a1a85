//! Facade re-exports for vitallm-generate

pub use crate::api::error::*;
pub use crate::api::traits::SequenceModel;
pub use crate::api::types::*;
pub use crate::core::cancel::CancelToken;
pub use crate::core::chat::ChatSession;
pub use crate::core::context::ContextWindow;
pub use crate::core::generator::{Generation, GenerationState, Generator};
pub use crate::core::prompt::{DEFAULT_SYSTEM_PROMPT, PromptTemplate, compose_prompt};
pub use crate::core::sampling::{
    TEMPERATURE_EPSILON, apply_temperature, apply_top_k, argmax, probabilities, sample,
    sample_categorical, sample_in_place, softmax,
};
pub use crate::core::stream::{StreamEvent, StreamHandle, spawn_stream};
pub use vitallm_tokenizer::{Tokenizer, TokenizerError};

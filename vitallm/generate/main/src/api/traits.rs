use crate::api::error::GenerateResult;

/// Next-token predictor driven by the decode loop.
///
/// Implementations are built once (weights loaded, buffers allocated) and
/// shared read-only across generation calls, hence the `Send + Sync` bound.
pub trait SequenceModel: Send + Sync {
    /// Logits for the position following the last token of `token_ids`.
    ///
    /// `token_ids` is never empty and never longer than [`block_size`](Self::block_size).
    /// The returned vector must have exactly [`vocab_size`](Self::vocab_size) entries.
    fn forward(&self, token_ids: &[u32]) -> GenerateResult<Vec<f32>>;

    /// Maximum number of trailing tokens the model conditions on.
    fn block_size(&self) -> usize;

    /// Number of entries in every logit vector.
    fn vocab_size(&self) -> usize;
}

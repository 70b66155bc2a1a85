//! Sampling functions for language model inference.
//!
//! Operates on raw logit slices for efficiency. The pipeline applied by
//! [`sample`] is: top-k truncation on the raw scores, temperature scaling
//! relative to the best score, softmax, then one categorical draw from a
//! caller-supplied RNG.

use rand::Rng;

use crate::api::error::{GenerateError, GenerateResult};

/// Added to the temperature before dividing so near-zero temperatures stay finite.
pub const TEMPERATURE_EPSILON: f32 = 1e-5;

/// Return the index of the maximum value in the logit slice.
/// The first occurrence wins on ties.
pub fn argmax(logits: &[f32]) -> u32 {
    let mut best = 0u32;
    let mut max_val = f32::NEG_INFINITY;
    for (i, &v) in logits.iter().enumerate() {
        if v > max_val {
            max_val = v;
            best = i as u32;
        }
    }
    best
}

/// Divide every logit by `temperature + TEMPERATURE_EPSILON`.
pub fn apply_temperature(logits: &mut [f32], temperature: f32) {
    let scale = temperature + TEMPERATURE_EPSILON;
    for v in logits.iter_mut() {
        *v /= scale;
    }
}

/// Keep only logits >= the k-th largest value; set the rest to NEG_INFINITY.
///
/// Every entry equal to the cutoff survives, so more than `k` candidates
/// remain when there are ties at the boundary. `k` is clamped to
/// `[1, logits.len()]`; `k >= logits.len()` is a no-op.
pub fn apply_top_k(logits: &mut [f32], k: usize) {
    let k = k.max(1);
    if k >= logits.len() {
        return;
    }
    let mut vals: Vec<f32> = logits.to_vec();
    let pivot = vals.len() - k;
    vals.select_nth_unstable_by(pivot, |a: &f32, b: &f32| a.total_cmp(b));
    let threshold = vals[pivot];

    for v in logits.iter_mut() {
        if *v < threshold {
            *v = f32::NEG_INFINITY;
        }
    }
}

/// Numerically stable softmax. NEG_INFINITY entries get probability 0.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_val = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max_val == f32::NEG_INFINITY {
        return vec![0.0; logits.len()];
    }
    if max_val == f32::INFINITY {
        // Saturated scores split the mass evenly.
        let n = logits.iter().filter(|&&v| v == f32::INFINITY).count() as f32;
        return logits
            .iter()
            .map(|&v| if v == f32::INFINITY { 1.0 / n } else { 0.0 })
            .collect();
    }
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max_val).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Sample from a categorical distribution defined by logits (not probabilities).
/// Applies stable softmax internally then draws using the given RNG.
///
/// Never returns an index whose probability is zero. At least one logit must
/// be greater than NEG_INFINITY.
pub fn sample_categorical<R: Rng>(logits: &[f32], rng: &mut R) -> u32 {
    let probs = softmax(logits);

    let r: f32 = rng.r#gen();
    let mut cumsum = 0.0;
    let mut last_nonzero = 0;
    for (i, &p) in probs.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        cumsum += p;
        last_nonzero = i;
        if r < cumsum {
            return i as u32;
        }
    }
    // Rounding left the cumulative sum just below r.
    last_nonzero as u32
}

/// Filtered distribution the sampler draws from: softmax over the
/// top-k truncated, temperature-scaled logits.
pub fn probabilities(logits: &[f32], temperature: f32, top_k: usize) -> Vec<f32> {
    let mut scaled = logits.to_vec();
    truncate_and_scale(&mut scaled, temperature, top_k);
    softmax(&scaled)
}

/// Top-k cutoff on the unscaled scores, then temperature.
///
/// Scores are shifted so the best one is 0 before dividing; surviving
/// scores stay finite and <= 0 however small the temperature.
fn truncate_and_scale(logits: &mut [f32], temperature: f32, top_k: usize) {
    apply_top_k(logits, top_k);
    let max_val = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max_val.is_finite() {
        for v in logits.iter_mut() {
            *v -= max_val;
        }
    }
    apply_temperature(logits, temperature);
}

/// Temperature, top-k, categorical draw. Leaves `logits` unchanged.
pub fn sample<R: Rng>(
    logits: &[f32],
    temperature: f32,
    top_k: usize,
    rng: &mut R,
) -> GenerateResult<u32> {
    let mut scratch = logits.to_vec();
    sample_in_place(&mut scratch, temperature, top_k, rng)
}

/// Same as [`sample`] but reuses `logits` as scratch space.
pub fn sample_in_place<R: Rng>(
    logits: &mut [f32],
    temperature: f32,
    top_k: usize,
    rng: &mut R,
) -> GenerateResult<u32> {
    check_logits(logits)?;
    truncate_and_scale(logits, temperature, top_k);
    Ok(sample_categorical(logits, rng))
}

/// The sampler needs at least one finite score and no NaN or +inf.
fn check_logits(logits: &[f32]) -> GenerateResult<()> {
    if logits.is_empty() {
        return Err(GenerateError::Model("empty logit vector".into()));
    }
    if let Some(i) = logits.iter().position(|v| v.is_nan() || *v == f32::INFINITY) {
        return Err(GenerateError::Model(format!(
            "non-finite logit {} at index {}",
            logits[i], i
        )));
    }
    if logits.iter().all(|&v| v == f32::NEG_INFINITY) {
        return Err(GenerateError::Model("every logit is -inf".into()));
    }
    Ok(())
}

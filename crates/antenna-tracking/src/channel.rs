//! Channel / Receive Model
//!
//! The base station "receives" the burst by convolving it with its own gain
//! pattern. Output is trimmed to the length of the longer input, centred on
//! the full convolution.

use crate::gain_pattern::GainPattern;

/// Full linear convolution, length `a.len() + b.len() - 1`
pub fn convolve_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// "Same"-mode convolution, length `max(a.len(), b.len())`
pub fn convolve_same(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let n = a.len().max(b.len());
    let m = a.len().min(b.len());
    let offset = (m - 1) / 2;

    let mut full = convolve_full(a, b);
    full.drain(..offset);
    full.truncate(n);
    full
}

/// Received signal at the base station for one tick
pub fn receive(noisy: &[f64], pattern: &GainPattern) -> Vec<f64> {
    convolve_same(noisy, &pattern.gains)
}

//! Gain Pattern Model
//!
//! Directional lobe of the base-station antenna sampled over [-π, π]:
//!
//! ```text
//! G(θ) = cos²(θ - θ_base) / exp(|θ|)
//! ```
//!
//! The lobe is centred on the heading and attenuated away from θ = 0 by the
//! exponential term. It is a display pattern, not a physical antenna model.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// `n` evenly spaced values from `start` to `end`, both endpoints included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Gain at a single angle for a given heading
pub fn gain_at(angle: f64, base_angle: f64) -> f64 {
    (angle - base_angle).cos().powi(2) / angle.abs().exp()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainPattern {
    pub base_angle: f64,
    /// Sample angles in radians, increasing from -π to π
    pub angles: Vec<f64>,
    pub gains: Vec<f64>,
}

impl GainPattern {
    pub fn compute(base_angle: f64, samples: usize) -> Self {
        let angles = linspace(-PI, PI, samples);
        let gains = angles.iter().map(|&a| gain_at(a, base_angle)).collect();
        Self {
            base_angle,
            angles,
            gains,
        }
    }

    pub fn len(&self) -> usize {
        self.gains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.angles.iter().copied().zip(self.gains.iter().copied())
    }

    /// Sample angles in degrees, for plotting
    pub fn angles_deg(&self) -> Vec<f64> {
        self.angles.iter().map(|a| a.to_degrees()).collect()
    }
}

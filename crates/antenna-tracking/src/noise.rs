//! Noise Model
//!
//! Perturbs the transmitted burst with a Rayleigh "fading" term and AWGN.
//!
//! Both terms are **added** to the sample: `y = x + r + n` with
//! `r ~ Rayleigh(σ)` and `n ~ N(0, std_dev)`. Physical fading would multiply
//! the sample by the Rayleigh magnitude; the additive form is what the demo
//! has always shown, so it is kept.

use rand::Rng;
use rand_distr::{Distribution, Normal, Weibull};
use std::f64::consts::SQRT_2;

use crate::{Result, TrackingError};

/// Rayleigh distribution with scale σ
///
/// Rayleigh(σ) is the Weibull distribution with shape 2 and scale σ·√2.
#[derive(Debug, Clone)]
pub struct Rayleigh {
    scale: f64,
    inner: Weibull<f64>,
}

impl Rayleigh {
    pub fn new(scale: f64) -> Result<Self> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(TrackingError::Noise(format!(
                "Rayleigh scale must be positive and finite, got {}",
                scale
            )));
        }
        let inner = Weibull::new(scale * SQRT_2, 2.0)
            .map_err(|e| TrackingError::Noise(format!("Rayleigh({}): {}", scale, e)))?;
        Ok(Self { scale, inner })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// E[r] = σ·√(π/2)
    pub fn mean(&self) -> f64 {
        self.scale * (std::f64::consts::PI / 2.0).sqrt()
    }
}

impl Distribution<f64> for Rayleigh {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}

/// Additive Rayleigh + Gaussian noise
#[derive(Debug, Clone)]
pub struct NoiseModel {
    fading: Rayleigh,
    awgn: Normal<f64>,
}

impl NoiseModel {
    pub fn new(rayleigh_scale: f64, noise_std_dev: f64) -> Result<Self> {
        let fading = Rayleigh::new(rayleigh_scale)?;
        if !(noise_std_dev >= 0.0) || !noise_std_dev.is_finite() {
            return Err(TrackingError::Noise(format!(
                "AWGN std_dev must be non-negative and finite, got {}",
                noise_std_dev
            )));
        }
        let awgn = Normal::new(0.0, noise_std_dev)
            .map_err(|e| TrackingError::Noise(format!("AWGN std_dev {}: {}", noise_std_dev, e)))?;
        Ok(Self { fading, awgn })
    }

    /// Return a same-length copy of `signal` with fading and noise added
    pub fn apply<R: Rng + ?Sized>(&self, signal: &[f64], rng: &mut R) -> Vec<f64> {
        // Fading draws first, then AWGN, one batch each
        let fading: Vec<f64> = (0..signal.len()).map(|_| self.fading.sample(rng)).collect();
        let awgn: Vec<f64> = (0..signal.len()).map(|_| self.awgn.sample(rng)).collect();

        signal
            .iter()
            .zip(fading)
            .zip(awgn)
            .map(|((x, r), n)| x + r + n)
            .collect()
    }
}

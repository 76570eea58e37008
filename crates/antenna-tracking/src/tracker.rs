//! Peak Detector
//!
//! Turns the received signal into a new base-station heading.
//!
//! 1. Score every sample by `received[i] * cos(mobile - base)`.
//! 2. Take the first index of the maximum score.
//! 3. Heading = index * 2π / len.
//! 4. Dither: +nudge if the peak stayed within the convergence window of the
//!    previous peak, -nudge otherwise.
//!
//! The cosine weight is one scalar for the whole vector, not a per-sample
//! angular weight. A positive weight therefore never moves the peak, a
//! negative one turns the search into an argmin, and a zero weight pins the
//! peak to index 0.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::TrackingConfig;
use crate::{Result, TrackingError};

/// Index of the first maximum. NaN samples never win against a number.
pub fn argmax(values: &[f64]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }

    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        let current = values[best];
        if v > current || (current.is_nan() && !v.is_nan()) {
            best = i;
        }
    }
    Some(best)
}

/// Outcome of one detection pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakDecision {
    pub max_gain_index: usize,
    pub prev_max_gain_index: usize,
    /// Scalar weight `cos(mobile - base)` applied to the received signal
    pub weight: f64,
    /// `max_gain_index * 2π / len`, before the dither
    pub peak_angle: f64,
    /// Peak stayed inside the convergence window
    pub converged: bool,
    /// New heading, dither included
    pub base_angle: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PeakDetector {
    convergence_window: usize,
    nudge_rad: f64,
}

impl PeakDetector {
    pub fn new(convergence_window: usize, nudge_rad: f64) -> Self {
        Self {
            convergence_window,
            nudge_rad,
        }
    }

    pub fn from_config(config: &TrackingConfig) -> Self {
        Self::new(config.convergence_window, config.nudge_rad)
    }

    pub fn score(received: &[f64], mobile_angle: f64, base_angle: f64) -> Vec<f64> {
        let weight = (mobile_angle - base_angle).cos();
        received.iter().map(|r| r * weight).collect()
    }

    pub fn is_converged(&self, index: usize, prev_index: usize) -> bool {
        index.abs_diff(prev_index) < self.convergence_window
    }

    /// Angle of sample `index` in a `len`-sample signal, `index·2π/len`
    pub fn peak_angle(index: usize, len: usize) -> f64 {
        index as f64 * 2.0 * PI / len as f64
    }

    /// Heading for a peak at `index` of a `len`-sample signal, dither included
    pub fn heading(&self, index: usize, prev_index: usize, len: usize) -> f64 {
        let peak_angle = Self::peak_angle(index, len);
        if self.is_converged(index, prev_index) {
            peak_angle + self.nudge_rad
        } else {
            peak_angle - self.nudge_rad
        }
    }

    pub fn detect(
        &self,
        received: &[f64],
        mobile_angle: f64,
        base_angle: f64,
        prev_max_gain_index: usize,
    ) -> Result<PeakDecision> {
        let scores = Self::score(received, mobile_angle, base_angle);
        let max_gain_index = argmax(&scores).ok_or(TrackingError::EmptySignal)?;

        let peak_angle = Self::peak_angle(max_gain_index, received.len());
        let converged = self.is_converged(max_gain_index, prev_max_gain_index);

        Ok(PeakDecision {
            max_gain_index,
            prev_max_gain_index,
            weight: (mobile_angle - base_angle).cos(),
            peak_angle,
            converged,
            base_angle: self.heading(max_gain_index, prev_max_gain_index, received.len()),
        })
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::from_config(&TrackingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp_peak_at(peak: usize, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 1.0 - (i as f64 - peak as f64).abs() / len as f64)
            .collect()
    }

    #[test]
    fn test_argmax_ties_pick_lowest_index() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[0.0; 8]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, 0.5, 2.0]), Some(2));
        assert_eq!(argmax(&[1.0, f64::NAN, 0.5]), Some(0));
        assert_eq!(argmax(&[f64::NAN, f64::NAN]), Some(0));
    }

    #[test]
    fn test_converged_nudges_forward() {
        let detector = PeakDetector::default();
        let received = ramp_peak_at(90, 360);

        let decision = detector.detect(&received, 0.0, 0.0, 88).unwrap();

        assert_eq!(decision.max_gain_index, 90);
        assert!(decision.converged);
        assert!((decision.peak_angle - PI / 2.0).abs() < 1e-12);
        assert!((decision.base_angle - (PI / 2.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_last_index_heading_upper_bound() {
        let detector = PeakDetector::default();
        let received = ramp_peak_at(359, 360);

        let decision = detector.detect(&received, 0.0, 0.0, 359).unwrap();

        assert_eq!(decision.max_gain_index, 359);
        assert!(decision.converged);
        assert!(decision.base_angle <= 2.0 * PI * 359.0 / 360.0 + 1.0);
        assert_eq!(decision.base_angle, 359.0 * 2.0 * PI / 360.0 + 1.0);
    }

    #[test]
    fn test_moved_peak_nudges_back() {
        let detector = PeakDetector::default();
        let received = ramp_peak_at(90, 360);

        let decision = detector.detect(&received, 0.0, 0.0, 0).unwrap();

        assert!(!decision.converged);
        assert!((decision.base_angle - (PI / 2.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_window_boundary() {
        let detector = PeakDetector::new(5, 1.0);

        assert!(detector.is_converged(10, 6));
        assert!(detector.is_converged(6, 10));
        assert!(!detector.is_converged(10, 5));
        assert!(!detector.is_converged(5, 10));
    }

    #[test]
    fn test_scalar_weight_does_not_steer_positive() {
        // The weight is the same for every sample, so any positive value
        // leaves the peak where the received signal already had it.
        let detector = PeakDetector::default();
        let received = ramp_peak_at(200, 360);

        for mobile in [-1.0, -0.3, 0.0, 0.4, 1.2] {
            let decision = detector.detect(&received, mobile, 0.0, 0).unwrap();
            assert_eq!(decision.max_gain_index, 200);
        }
    }

    #[test]
    fn test_scalar_weight_negative_selects_minimum() {
        let detector = PeakDetector::default();
        let received = ramp_peak_at(200, 360);

        // cos(π) = -1: the lowest received sample wins
        let decision = detector.detect(&received, PI, 0.0, 0).unwrap();
        assert_eq!(decision.max_gain_index, 0);
        assert!(decision.weight < 0.0);
    }

    #[test]
    fn test_empty_signal_is_an_error() {
        let detector = PeakDetector::default();
        assert!(matches!(
            detector.detect(&[], 0.0, 0.0, 0),
            Err(TrackingError::EmptySignal)
        ));
    }

    proptest! {
        #[test]
        fn test_index_in_range_and_heading_formula(
            received in prop::collection::vec(-5.0f64..5.0, 360),
            mobile in -PI..PI,
            base in -1.0f64..8.0,
            prev in 0usize..360,
        ) {
            let detector = PeakDetector::default();
            let d = detector.detect(&received, mobile, base, prev).unwrap();

            prop_assert!(d.max_gain_index < 360);
            let raw = d.max_gain_index as f64 * 2.0 * PI / 360.0;
            let expected = if d.max_gain_index.abs_diff(prev) < 5 { raw + 1.0 } else { raw - 1.0 };
            prop_assert!((d.base_angle - expected).abs() < 1e-12);
            prop_assert!(d.base_angle >= -1.0);
            prop_assert!(d.base_angle < 2.0 * PI + 1.0);
        }
    }
}

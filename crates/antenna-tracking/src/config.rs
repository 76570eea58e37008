//! Tracking Configuration
//!
//! Every numeric constant of the demo in one place. All fields default to the
//! classic demo values, so a partial JSON document only overrides what it
//! names.

use serde::{Deserialize, Serialize};

use crate::{Result, TrackingError};

/// Bits transmitted per tick
pub const DEFAULT_SIGNAL_LENGTH: usize = 10;
/// Angular samples of the gain pattern over [-π, π]
pub const DEFAULT_PATTERN_SAMPLES: usize = 360;
/// Rayleigh fading scale (σ)
pub const DEFAULT_RAYLEIGH_SCALE: f64 = 0.5;
/// AWGN standard deviation
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.1;
/// Peak index window inside which the loop counts as converged
pub const DEFAULT_CONVERGENCE_WINDOW: usize = 5;
/// Dither applied to the heading every tick (radians)
pub const DEFAULT_NUDGE_RAD: f64 = 1.0;
/// Pause between ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Canvas the scene geometry is expressed in (pixels, y axis pointing down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub center_x: f64,
    pub center_y: f64,
    /// Circle the mobile icon is pinned to
    pub radius: f64,
    pub ray_count: usize,
    pub ray_length: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            center_x: 200.0,
            center_y: 200.0,
            radius: 100.0,
            ray_count: 90,
            ray_length: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub signal_length: usize,
    pub pattern_samples: usize,
    pub rayleigh_scale: f64,
    pub noise_std_dev: f64,
    pub convergence_window: usize,
    pub nudge_rad: f64,
    pub tick_interval_ms: u64,
    pub canvas: CanvasConfig,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            signal_length: DEFAULT_SIGNAL_LENGTH,
            pattern_samples: DEFAULT_PATTERN_SAMPLES,
            rayleigh_scale: DEFAULT_RAYLEIGH_SCALE,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
            convergence_window: DEFAULT_CONVERGENCE_WINDOW,
            nudge_rad: DEFAULT_NUDGE_RAD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            canvas: CanvasConfig::default(),
        }
    }
}

impl TrackingConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.signal_length == 0 {
            return Err(invalid("signal_length must be at least 1"));
        }
        if self.pattern_samples < 2 {
            return Err(invalid("pattern_samples must be at least 2"));
        }
        // NaN fails both comparisons below
        if !(self.rayleigh_scale > 0.0) {
            return Err(invalid(format!(
                "rayleigh_scale must be positive, got {}",
                self.rayleigh_scale
            )));
        }
        if !(self.noise_std_dev >= 0.0) {
            return Err(invalid(format!(
                "noise_std_dev must be non-negative, got {}",
                self.noise_std_dev
            )));
        }
        if !self.nudge_rad.is_finite() {
            return Err(invalid("nudge_rad must be finite"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be at least 1"));
        }
        if !(self.canvas.radius > 0.0) {
            return Err(invalid(format!(
                "canvas.radius must be positive, got {}",
                self.canvas.radius
            )));
        }
        if !self.canvas.center_x.is_finite() || !self.canvas.center_y.is_finite() {
            return Err(invalid("canvas center must be finite"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> TrackingError {
    TrackingError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.signal_length, 10);
        assert_eq!(config.pattern_samples, 360);
        assert_eq!(config.convergence_window, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            TrackingConfig::from_json_str(r#"{"noise_std_dev": 0.3, "canvas": {"radius": 50}}"#)
                .unwrap();

        assert_eq!(config.noise_std_dev, 0.3);
        assert_eq!(config.canvas.radius, 50.0);
        assert_eq!(config.canvas.center_x, 200.0);
        assert_eq!(config.signal_length, DEFAULT_SIGNAL_LENGTH);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let cases = [
            TrackingConfig { signal_length: 0, ..Default::default() },
            TrackingConfig { pattern_samples: 1, ..Default::default() },
            TrackingConfig { rayleigh_scale: 0.0, ..Default::default() },
            TrackingConfig { noise_std_dev: -0.1, ..Default::default() },
            TrackingConfig { noise_std_dev: f64::NAN, ..Default::default() },
            TrackingConfig { tick_interval_ms: 0, ..Default::default() },
            TrackingConfig {
                canvas: CanvasConfig { radius: 0.0, ..Default::default() },
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(TrackingError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = TrackingConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TrackingError::ConfigParse(_)));
    }
}

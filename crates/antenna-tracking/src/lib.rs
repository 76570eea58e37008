//! Antenna Alignment Tracking
//!
//! Numeric core of the antenna alignment demo. A mobile (omnidirectional)
//! antenna transmits a short noisy bipolar burst; a directional base-station
//! antenna receives it through its gain pattern and re-points itself at the
//! peak of the received signal every tick.
//!
//! Each tick runs:
//! - Signal generation (random bits mapped to ±1)
//! - Additive Rayleigh fading + AWGN
//! - Gain pattern of the base station around its current heading
//! - "Same"-mode convolution of the noisy burst with the gain pattern
//! - Peak detection and heading update with a ±1 rad dither
//!
//! Rendering lives outside this crate: every tick produces a [`Frame`] that a
//! [`VisualizationSink`] consumes.

use thiserror::Error;

pub mod channel;
pub mod config;
pub mod frame;
pub mod gain_pattern;
pub mod geometry;
pub mod noise;
pub mod signal;
pub mod sink;
pub mod tracker;
pub mod tracking;

// Re-exports
pub use config::{CanvasConfig, TrackingConfig};
pub use frame::{CanvasPoint, Frame, Scene, Series};
pub use gain_pattern::GainPattern;
pub use geometry::CanvasGeometry;
pub use noise::{NoiseModel, Rayleigh};
pub use signal::{SignalGenerator, TransmittedSignal};
pub use sink::{JsonLinesSink, RecordingSink, SinkError, TracingSink, VisualizationSink};
pub use tracker::{PeakDecision, PeakDetector};
pub use tracking::{StepOutput, Tracker, TrackingLoop, TrackingState};

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Invalid noise parameter: {0}")]
    Noise(String),
    #[error("Cannot detect a peak in an empty signal")]
    EmptySignal,
    #[error("Visualization sink failed: {0}")]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, TrackingError>;

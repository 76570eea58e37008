//! Frame
//!
//! Everything a visualization sink needs after one tick: the four chart
//! series and the icon layout of the canvas.

use serde::{Deserialize, Serialize};

use crate::gain_pattern::linspace;
use crate::tracking::{StepOutput, TrackingState};

/// Time axis span of the signal charts
pub const SIGNAL_TIME_SPAN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconRect {
    pub top_left: CanvasPoint,
    pub bottom_right: CanvasPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub at: CanvasPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
}

/// Icon layout for the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub mobile_icon: IconRect,
    pub base_lobe: [CanvasPoint; 3],
    pub mobile_label: Label,
    pub base_label: Label,
    pub rays: Vec<Ray>,
}

/// One chart: labelled x/y data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(title: &str, x_label: &str, y_label: &str, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub timestamp_ms: i64,
    /// State after the step
    pub state: TrackingState,
    pub max_gain_index: usize,
    pub converged: bool,
    pub gain_pattern: Series,
    pub transmitted: Series,
    pub noisy: Series,
    pub received: Series,
    pub scene: Scene,
}

impl Frame {
    pub fn from_step(tick: u64, timestamp_ms: i64, step: &StepOutput, scene: Scene) -> Self {
        let angles_deg = step.pattern.angles_deg();
        let time = linspace(0.0, SIGNAL_TIME_SPAN, step.transmitted.len());

        Self {
            tick,
            timestamp_ms,
            state: step.state,
            max_gain_index: step.decision.max_gain_index,
            converged: step.decision.converged,
            gain_pattern: Series::new(
                "Gain of Directional",
                "angle",
                "Gain",
                angles_deg.clone(),
                step.pattern.gains.clone(),
            ),
            transmitted: Series::new(
                "Signal provided",
                "time",
                "value",
                time.clone(),
                step.transmitted.bits.iter().map(|&b| f64::from(b)).collect(),
            ),
            noisy: Series::new("Noisy Signal", "time", "value", time, step.noisy.clone()),
            received: Series::new(
                "Signal received",
                "angle",
                "value",
                angles_deg,
                step.received.clone(),
            ),
            scene,
        }
    }

    /// Series lengths in chart order: gain, transmitted, noisy, received
    pub fn series_lengths(&self) -> (usize, usize, usize, usize) {
        (
            self.gain_pattern.len(),
            self.transmitted.len(),
            self.noisy.len(),
            self.received.len(),
        )
    }
}

//! Visualization Sinks
//!
//! A sink receives one [`Frame`] per tick and draws it somewhere. Rendering
//! blocks the loop until it returns.

use std::io::Write;

use thiserror::Error;
use tracing::info;

use crate::frame::Frame;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait VisualizationSink {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

impl<S: VisualizationSink + ?Sized> VisualizationSink for Box<S> {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        (**self).render(frame)
    }
}

/// One JSON object per frame, newline separated
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VisualizationSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs a one-line summary of every n-th frame
pub struct TracingSink {
    every: u64,
}

impl TracingSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(1)
    }
}

impl VisualizationSink for TracingSink {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        if frame.tick % self.every != 0 {
            return Ok(());
        }

        let peak_gain = frame
            .received
            .y
            .get(frame.max_gain_index)
            .copied()
            .unwrap_or_default();
        let tip = frame.scene.base_lobe[2];

        info!(
            tick = frame.tick,
            mobile_rad = frame.state.mobile_angle,
            base_rad = frame.state.base_angle,
            peak_index = frame.max_gain_index,
            peak_received = peak_gain,
            converged = frame.converged,
            "lobe tip at ({:.1}, {:.1})",
            tip.x,
            tip.y
        );
        Ok(())
    }
}

/// Keeps every frame in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl VisualizationSink for RecordingSink {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

//! Tracking Loop
//!
//! Coordinates signal generation, noise, gain pattern, channel and peak
//! detection for one tick. [`Tracker::step`] is the pure per-tick function:
//! it takes the previous [`TrackingState`] and a random source and returns
//! the next state with every intermediate series. [`TrackingLoop`] owns the
//! state, the RNG and the canvas geometry for a caller-driven run loop.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    channel,
    config::TrackingConfig,
    frame::Frame,
    gain_pattern::GainPattern,
    geometry::CanvasGeometry,
    noise::NoiseModel,
    signal::{SignalGenerator, TransmittedSignal},
    sink::VisualizationSink,
    tracker::{PeakDecision, PeakDetector},
    Result,
};

/// Ticks between info-level tracking summaries
const SUMMARY_EVERY_TICKS: u64 = 50;

/// State carried from one tick to the next
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingState {
    /// Mobile position around the centre (radians), set from outside
    pub mobile_angle: f64,
    /// Base-station heading (radians), owned by the loop
    pub base_angle: f64,
    pub prev_max_gain_index: usize,
}

impl TrackingState {
    pub fn with_mobile_angle(self, mobile_angle: f64) -> Self {
        Self {
            mobile_angle,
            ..self
        }
    }
}

/// Everything one step computed
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub state: TrackingState,
    pub transmitted: TransmittedSignal,
    pub noisy: Vec<f64>,
    pub pattern: GainPattern,
    pub received: Vec<f64>,
    pub decision: PeakDecision,
}

/// Per-tick pipeline, stateless apart from its configuration
#[derive(Debug, Clone)]
pub struct Tracker {
    generator: SignalGenerator,
    noise: NoiseModel,
    detector: PeakDetector,
    pattern_samples: usize,
}

impl Tracker {
    pub fn new(config: &TrackingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: SignalGenerator::new(config.signal_length),
            noise: NoiseModel::new(config.rayleigh_scale, config.noise_std_dev)?,
            detector: PeakDetector::from_config(config),
            pattern_samples: config.pattern_samples,
        })
    }

    pub fn step<R: Rng + ?Sized>(&self, state: TrackingState, rng: &mut R) -> Result<StepOutput> {
        let transmitted = self.generator.generate(rng);
        let noisy = self.noise.apply(&transmitted.symbols, rng);
        let pattern = GainPattern::compute(state.base_angle, self.pattern_samples);
        let received = channel::receive(&noisy, &pattern);

        // Scored against the heading the pattern was computed for
        let decision = self.detector.detect(
            &received,
            state.mobile_angle,
            state.base_angle,
            state.prev_max_gain_index,
        )?;

        Ok(StepOutput {
            state: TrackingState {
                mobile_angle: state.mobile_angle,
                base_angle: decision.base_angle,
                prev_max_gain_index: decision.max_gain_index,
            },
            transmitted,
            noisy,
            pattern,
            received,
            decision,
        })
    }
}

/// Caller-driven tracking loop
pub struct TrackingLoop<R: Rng> {
    state: TrackingState,
    tracker: Tracker,
    geometry: CanvasGeometry,
    rng: R,
    tick: u64,
}

impl<R: Rng> TrackingLoop<R> {
    pub fn new(config: &TrackingConfig, rng: R) -> Result<Self> {
        Ok(Self {
            state: TrackingState::default(),
            tracker: Tracker::new(config)?,
            geometry: CanvasGeometry::new(&config.canvas),
            rng,
            tick: 0,
        })
    }

    pub fn with_state(mut self, state: TrackingState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn set_mobile_angle(&mut self, mobile_angle: f64) {
        self.state.mobile_angle = mobile_angle;
    }

    /// Pointer drag at canvas coordinates; returns the new mobile angle
    pub fn drag_mobile_to(&mut self, x: f64, y: f64) -> f64 {
        let angle = self.geometry.pointer_angle(x, y);
        debug!("Mobile dragged to ({:.1}, {:.1}) -> {:.3} rad", x, y, angle);
        self.set_mobile_angle(angle);
        angle
    }

    /// Run one step and build the frame for it
    pub fn tick(&mut self) -> Result<Frame> {
        debug!("prev_max_gain_index={}", self.state.prev_max_gain_index);

        let step = self.tracker.step(self.state, &mut self.rng)?;
        self.state = step.state;
        self.tick += 1;

        if self.tick % SUMMARY_EVERY_TICKS == 0 {
            info!(
                "tick {} mobile={:.3} rad base={:.3} rad peak={} converged={}",
                self.tick,
                self.state.mobile_angle,
                self.state.base_angle,
                step.decision.max_gain_index,
                step.decision.converged
            );
        }

        let scene = self.geometry.scene(self.state.mobile_angle, self.state.base_angle);
        Ok(Frame::from_step(self.tick, Utc::now().timestamp_millis(), &step, scene))
    }

    /// Tick and hand the frame to `sink`
    pub fn tick_into<S: VisualizationSink + ?Sized>(&mut self, sink: &mut S) -> Result<Frame> {
        let frame = self.tick()?;
        sink.render(&frame)?;
        Ok(frame)
    }
}

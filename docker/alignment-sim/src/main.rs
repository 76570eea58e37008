// Antenna Alignment Simulation
// Drives the base-station tracking loop on a timer and streams frames to a sink

mod input;
mod settings;

use anyhow::Result;
use antenna_tracking::{JsonLinesSink, TracingSink, TrackingLoop, VisualizationSink};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn, Level};

use input::InputEvent;
use settings::SimSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// One JSON frame per line on stdout
    Json,
    /// Log summaries only
    Log,
}

#[derive(Parser, Debug)]
#[command(
    name = "alignment-sim",
    about = "Directional base-station antenna tracking a mobile transmitter"
)]
struct Args {
    /// Settings JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Where frames go
    #[arg(long, value_enum, default_value_t = SinkKind::Json)]
    sink: SinkKind,

    /// Initial mobile angle in radians
    #[arg(long)]
    mobile_angle: Option<f64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries frames
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| "alignment_sim=info,antenna_tracking=info".to_string()),
            )
            .with_writer(io::stderr)
            .init();
    }

    let settings = SimSettings::load(args.config.as_deref())?;
    let config = settings.tracking.clone();

    let rng = match args.seed.or(settings.seed) {
        Some(seed) => {
            info!("Seeded run, seed={}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let mut tracker = TrackingLoop::new(&config, rng)?;
    if let Some(angle) = args.mobile_angle.or(settings.mobile_angle) {
        tracker.set_mobile_angle(settings::check_mobile_angle(angle)?);
    }

    let mut sink: Box<dyn VisualizationSink> = match args.sink {
        SinkKind::Json => Box::new(JsonLinesSink::new(BufWriter::new(io::stdout()))),
        SinkKind::Log => Box::new(TracingSink::new(10)),
    };

    info!(
        "Alignment sim starting: {} bits/tick, {} pattern samples, tick every {} ms",
        config.signal_length, config.pattern_samples, config.tick_interval_ms
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let mut interval = time::interval(Duration::from_millis(config.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let frame = tracker.tick_into(&mut sink)?;
                if args.ticks.is_some_and(|limit| frame.tick >= limit) {
                    info!("Tick budget reached after {} ticks", frame.tick);
                    break;
                }
            }

            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match input::parse_line(&line) {
                        Ok(Some(InputEvent::Drag { x, y })) => {
                            let angle = tracker.drag_mobile_to(x, y);
                            info!("Mobile moved to {:.3} rad", angle);
                        }
                        Ok(Some(InputEvent::SetAngle(angle))) => {
                            tracker.set_mobile_angle(angle);
                            info!("Mobile set to {:.3} rad", angle);
                        }
                        Ok(Some(InputEvent::Quit)) => {
                            info!("Quit requested");
                            break;
                        }
                        Ok(None) => {}
                        Err(e) => warn!("Ignoring input: {}", e),
                    },
                    None => stdin_open = false,
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    let state = tracker.state();
    info!(
        "Stopped after {} ticks: mobile={:.3} rad base={:.3} rad",
        tracker.ticks(),
        state.mobile_angle,
        state.base_angle
    );

    Ok(())
}

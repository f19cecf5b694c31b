use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::oneshot;

use playback_overlay::overlay::{LoggingView, PlayerOverlay};
use playback_overlay::player::{SimulatedPlayer, SimulationConfig};
use playback_overlay::utils::{self, OverlayConfig};
use playback_overlay::{OverlayDelegate, OverlayView, PlaybackError, PlayerState, UiIntent};

/// Drive the playback overlay against a simulated player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media URL to "play" (prefix with `fail:` to simulate a load error)
    #[arg(value_name = "URL")]
    url: String,

    /// Simulated clip length in seconds
    #[arg(long, value_name = "SECS", default_value = "12")]
    duration: f64,

    /// Override the auto-hide delay in seconds
    #[arg(long = "auto-hide", value_name = "SECS")]
    auto_hide: Option<f64>,

    /// Print UI intents as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file to use instead of the standard locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective configuration to the user config file before playing
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => OverlayConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => utils::load_config().context("Failed to load config")?,
    };
    if let Some(secs) = args.auto_hide {
        config.controls.auto_hide_secs = secs;
        config.validate()?;
    }

    let log_level = if args.debug {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting playback overlay v{}", env!("CARGO_PKG_VERSION"));

    if args.save_config {
        config.save().context("Failed to save config")?;
        info!("Saved configuration");
    }

    let (done_tx, done_rx) = oneshot::channel();
    let view: Box<dyn OverlayView> = if args.json {
        Box::new(JsonLinesView)
    } else {
        Box::new(LoggingView)
    };
    let simulation = SimulationConfig {
        duration: args.duration,
        ..SimulationConfig::default()
    };

    let mut overlay = PlayerOverlay::builder()
        .with_config(config.controls.clone())
        .with_view(view)
        .with_delegate(Box::new(ConsoleDelegate {
            done: Some(done_tx),
        }))
        .build(|events| Ok(SimulatedPlayer::new(events, simulation)))?;

    overlay.load_video(&args.url);

    let mut failure = None;
    overlay
        .run_until(async {
            tokio::select! {
                outcome = done_rx => match outcome {
                    Ok(Outcome::Finished) => info!("Reached end of media"),
                    Ok(Outcome::Failed(e)) => failure = Some(e),
                    Err(_) => warn!("Overlay dropped its delegate"),
                },
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            }
        })
        .await;

    overlay.destroy();

    match failure {
        Some(e) => {
            error!("Playback failed: {}", e);
            Err(e.into())
        }
        None => Ok(()),
    }
}

enum Outcome {
    Finished,
    Failed(PlaybackError),
}

/// Writes every intent to stdout as one JSON object per line
struct JsonLinesView;

impl OverlayView for JsonLinesView {
    fn apply(&mut self, intent: &UiIntent) {
        match serde_json::to_string(intent) {
            Ok(line) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", line) {
                    warn!("Failed to write intent: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize {:?}: {}", intent, e),
        }
    }
}

/// Logs callbacks and signals the first finish or failure
struct ConsoleDelegate {
    done: Option<oneshot::Sender<Outcome>>,
}

impl ConsoleDelegate {
    fn finish(&mut self, outcome: Outcome) {
        if let Some(done) = self.done.take() {
            // Receiver is gone once the loop has stopped
            let _ = done.send(outcome);
        }
    }
}

impl OverlayDelegate for ConsoleDelegate {
    fn controls_visibility_changed(&mut self, visible: bool) {
        info!("Controls {}", if visible { "shown" } else { "hidden" });
    }

    fn playback_finished(&mut self) {
        self.finish(Outcome::Finished);
    }

    fn playback_failed(&mut self, error: &PlaybackError) {
        self.finish(Outcome::Failed(error.clone()));
    }

    fn player_state_changed(&mut self, state: PlayerState) {
        info!("Player state: {:?}", state);
    }
}

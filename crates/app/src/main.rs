use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wavemark_core::{
    ClockPlayer, ConfigOverrides, Event, FittedOverview, PointSpec, Renderer, SegmentSpec, Viewer,
    ViewerConfig,
};

const CONTAINER_WIDTH: u32 = 1000;
const DEMO_SAMPLE_RATE: u64 = 44_100;

fn main() -> wavemark_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { config } => run_config(config.as_deref()),
        Commands::Demo {
            config,
            zoom,
            duration,
        } => run_demo(config.as_deref(), zoom, duration),
    }
}

fn load_overrides(path: Option<&Path>) -> wavemark_core::Result<ConfigOverrides> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading options");
            ConfigOverrides::from_json(&std::fs::read_to_string(path)?)
        }
        None => Ok(ConfigOverrides::default()),
    }
}

fn run_config(path: Option<&Path>) -> wavemark_core::Result<()> {
    let config = ViewerConfig::default().merge(load_overrides(path)?);
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn run_demo(path: Option<&Path>, zoom: Option<i64>, duration: f64) -> wavemark_core::Result<()> {
    tracing::info!(zoom, duration, "starting headless demo");

    let total_samples = (duration.max(0.0) * DEMO_SAMPLE_RATE as f64) as u64;
    let mut viewer = Viewer::builder()
        .options(load_overrides(path)?)
        .media(ClockPlayer::new())
        .container_width(CONTAINER_WIDTH)
        .renderer(LogRenderer::default())
        .waveform(FittedOverview {
            total_samples,
            width: CONTAINER_WIDTH,
        })
        .build()?;

    let _events = viewer.on("**", |event| {
        log_event(event);
        Ok(())
    })?;

    let added = viewer.segments_mut().add(vec![
        SegmentSpec::new(1.0, 2.0).with_label("intro"),
        SegmentSpec::new(3.0, 4.0).with_label("verse"),
    ])?;
    viewer.points_mut().add(PointSpec::new(2.5).with_label("cue"))?;

    if let Some(level) = zoom {
        viewer.zoom_mut().set_zoom(level);
    }
    viewer.zoom_mut().overview();

    viewer.play_segment(&added[1].id, false)?;
    let now = viewer.current_time();
    viewer.time_changed(now)?;

    viewer.segments_mut().remove_by_id(&added[0].id)?;
    for segment in viewer.segments().list() {
        tracing::info!(
            id = %segment.id,
            start = segment.start_time,
            end = segment.end_time,
            label = %segment.label_text,
            "segment"
        );
    }
    tracing::info!(level = viewer.zoom().get_zoom(), scale = viewer.zoom().scale(), "final zoom");

    viewer.destroy();
    Ok(())
}

fn log_event(event: &Event) {
    match event {
        Event::SegmentsAdd(segments) | Event::SegmentsRemove(segments) => {
            tracing::info!(topic = event.topic(), count = segments.len(), "event")
        }
        Event::PointsAdd(points) | Event::PointsRemove(points) => {
            tracing::info!(topic = event.topic(), count = points.len(), "event")
        }
        Event::ZoomUpdate { current, previous } => {
            tracing::info!(topic = event.topic(), current, previous, "event")
        }
        Event::PlayerSeek(seconds) | Event::PlayerTimeUpdate(seconds) => {
            tracing::info!(topic = event.topic(), seconds, "event")
        }
        Event::Error(message) => tracing::error!(topic = event.topic(), %message, "event"),
        other => tracing::info!(topic = other.topic(), "event"),
    }
}

/// Stand-in for a drawing backend that just counts frames.
#[derive(Debug, Default)]
struct LogRenderer {
    frames: usize,
}

impl Renderer for LogRenderer {
    fn render(&mut self) {
        self.frames += 1;
        tracing::debug!(frame = self.frames, "render");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Waveform annotation core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the effective configuration after merging an options file.
    Config {
        /// JSON file with option overrides.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Drive a headless viewer through a short annotation session.
    Demo {
        /// JSON file with option overrides.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Zoom level index to select; out-of-range values are clamped.
        #[arg(short, long, allow_negative_numbers = true)]
        zoom: Option<i64>,
        /// Length of the simulated track in seconds.
        #[arg(short, long, default_value_t = 60.0)]
        duration: f64,
    },
}

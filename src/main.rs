//! `tagtrack` binary: detect AprilTags in a video and track them when they
//! disappear.
//!
//! # Usage
//!
//! ```bash
//! ffmpeg -f v4l2 -i /dev/video0 -f image2pipe -vcodec ppm - \
//!     | tagtrack | ffplay -f image2pipe -i -
//! tagtrack --video frames/ --output annotated/ --report frames.jsonl
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use tagtrack_rs::{
    AprilTagDetector, Config, DirectorySink, FrameLoop, FrameReporter, Handoff, NullSink, Overlay,
    PpmStreamSink, ReinitPolicy, Sink, TrackerKind, VideoSource,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tagtrack",
    version,
    about = "AprilTag detection with a visual-tracker fallback",
    long_about = None
)]
struct Args {
    /// Video file, PPM stream or image directory. Reads a PPM stream from
    /// stdin when omitted.
    #[arg(short, long, value_name = "PATH")]
    video: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save annotated frames as PNGs in this directory instead of streaming
    /// them to stdout.
    #[arg(long, value_name = "DIR", conflicts_with = "no_display")]
    output: Option<PathBuf>,

    /// Discard annotated frames.
    #[arg(long, default_value_t = false)]
    no_display: bool,

    /// TrueType font for the id and status labels. DejaVu Sans is used when
    /// omitted.
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Tracker used when markers are lost (kcf, kalman).
    #[arg(long)]
    tracker: Option<TrackerKind>,

    /// When trackers are re-seeded (every-frame, once).
    #[arg(long)]
    reinit: Option<ReinitPolicy>,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    max_frames: Option<u64>,

    /// Write one JSON line per frame to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::from_json_file(path)?
        }
        None => Config::default(),
    };
    if let Some(kind) = args.tracker {
        config.tracker = kind;
    }
    if let Some(policy) = args.reinit {
        config.reinit = policy;
    }
    if args.max_frames.is_some() {
        config.max_frames = args.max_frames;
    }

    info!("starting video stream");
    let source = VideoSource::open(args.video.as_deref())?;
    let detector = AprilTagDetector::new(config.dictionary, config.detector.clone());
    let handoff = Handoff::new(config.tracker_settings(), config.reinit);
    let sink = if args.no_display {
        Sink::Null(NullSink)
    } else if let Some(dir) = &args.output {
        Sink::Directory(DirectorySink::new(dir)?)
    } else {
        Sink::Stream(PpmStreamSink::stdout())
    };
    let overlay = match args.font.as_deref() {
        Some(path) => Overlay::from_font_file(path)?,
        None => Overlay::new(),
    };

    let mut frame_loop = FrameLoop::new(source, detector, handoff, sink)
        .with_options(config.loop_options())
        .with_overlay(overlay);
    if let Some(path) = args.report.as_deref() {
        frame_loop = frame_loop.with_report(FrameReporter::create(path)?);
    }

    let summary = frame_loop.run()?;
    info!(
        "processed {} frames ({} detected, {} tracked)",
        summary.frames, summary.detected_frames, summary.tracked_frames
    );
    Ok(())
}

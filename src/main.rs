//! Exercise form coach: replays recorded pose landmarks through a plank or
//! criss-cross session and prints live feedback.

use anyhow::{Context, Result};
use clap::Parser;
use exercise_form_coach::{
    app::{AppConfig, CoachApp, StopToken, TimeBase},
    config::{Config, EXAMPLE_CONFIG},
    cue::{CueSink, SilentCue, TerminalBell},
    exercise::{BodySide, ExerciseEvaluator, ExerciseKind, HoldMode},
    pose_stream::RecordedPoseStream,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded pose stream (JSON lines)
    #[arg(short, long, required_unless_present = "print_config")]
    landmarks: Option<PathBuf>,

    /// Exercise to coach (plank, crisscross)
    #[arg(short, long, default_value = "plank")]
    exercise: String,

    /// Plank target duration in seconds (10 to 600)
    #[arg(long)]
    duration: Option<u64>,

    /// Plank mode (normal pauses on a break, hardcore resets)
    #[arg(short, long)]
    mode: Option<String>,

    /// Body side used for the plank angle (left, right)
    #[arg(long)]
    side: Option<String>,

    /// Criss cross beep interval in seconds (1 to 10)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Pause between frames in milliseconds (0 replays as fast as possible)
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Ring the terminal bell on each criss cross beep
    #[arg(long)]
    bell: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).with_context(|| format!("Failed to load config file {path}"))?
        }
        None => Config::default(),
    };

    if let Some(duration) = args.duration {
        config.plank.target_seconds = duration;
    }
    if let Some(mode) = &args.mode {
        config.plank.mode = mode.parse::<HoldMode>()?;
    }
    if let Some(side) = &args.side {
        config.plank.side = side.parse::<BodySide>()?;
    }
    if let Some(interval) = args.interval {
        config.criss_cross.cue_interval_seconds = interval;
    }
    if let Some(delay) = args.frame_delay_ms {
        config.session.frame_delay_ms = delay;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = load_config(&args)?;
    let kind: ExerciseKind = args.exercise.parse()?;
    let mut evaluator = config.create_evaluator(kind)?;

    let path = args.landmarks.context("--landmarks is required")?;
    let mut source = RecordedPoseStream::from_file(&path)?;

    let mut cue: Box<dyn CueSink> = if args.bell {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(SilentCue::new())
    };
    if args.bell && kind == ExerciseKind::Hold {
        warn!("--bell has no effect for the plank");
    }

    info!("Coaching {} from {}", evaluator.name(), path.display());

    let app_config = AppConfig {
        frame_delay: config.session.frame_delay(),
        time_base: TimeBase::FrameTimestamps,
    };
    let mut app = CoachApp::new(app_config);

    let mut last_line = String::new();
    let summary = app.run(&mut source, evaluator.as_mut(), cue.as_mut(), &StopToken::new(), |_, verdict| {
        let mut line = verdict.message.clone();
        if let Some(angle) = verdict.angle {
            line.push_str(&format!(" | angle {angle:.0}"));
        }
        if let Some(remaining) = verdict.remaining {
            line.push_str(&format!(" | {}s left", remaining.as_secs()));
        }
        for correction in &verdict.corrections {
            if *correction != verdict.message {
                line.push_str(&format!(" | {correction}"));
            }
        }
        if line != last_line {
            println!("{line}");
            last_line = line;
        }
    })?;

    let accuracy = if summary.frames == 0 {
        0.0
    } else {
        100.0 * summary.correct_frames as f64 / summary.frames as f64
    };
    println!(
        "{} frames, {:.1}% in good form, {} without a pose, {} cues{}",
        summary.frames,
        accuracy,
        summary.frames_without_pose,
        summary.cues,
        if summary.completed { ", complete" } else { "" }
    );

    Ok(())
}

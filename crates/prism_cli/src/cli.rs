use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::Schedule;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// One diffuse sphere under a sky gradient
    SingleSphere,
    /// A field of small random spheres around three large ones
    Spheres,
    /// Two checker-textured spheres
    CheckeredSpheres,
    /// Five coloured quads facing the camera
    Quads,
    /// A sphere lit by a quad light and a spherical light
    SimpleLight,
    /// The Cornell box with two rotated blocks
    CornellBox,
}

/// Row scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleChoice {
    /// Contiguous row bands, one thread per core
    Bands,
    /// Rows handed out dynamically by the thread pool
    Rows,
}

impl From<ScheduleChoice> for Schedule {
    fn from(choice: ScheduleChoice) -> Self {
        match choice {
            ScheduleChoice::Bands => Schedule::RowBands,
            ScheduleChoice::Rows => Schedule::PerRow,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Offline Monte Carlo path tracer")]
pub struct Args {
    /// Demo scene to render
    #[arg(long, value_enum, default_value = "cornell-box")]
    pub scene: SceneChoice,

    /// Output file path (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels (scene default if omitted)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel, rounded down to a square (scene default if omitted)
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum path depth (scene default if omitted)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Base seed for reproducible renders; a fresh one is drawn if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// How rows are spread across threads
    #[arg(long, value_enum, default_value = "rows")]
    pub schedule: ScheduleChoice,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["prism"]).unwrap();

        assert_eq!(args.scene, SceneChoice::CornellBox);
        assert_eq!(args.output, PathBuf::from("output.ppm"));
        assert_eq!(args.width, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.schedule, ScheduleChoice::Rows);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "prism",
            "--scene",
            "simple-light",
            "-o",
            "light.png",
            "--width",
            "320",
            "-s",
            "64",
            "--depth",
            "8",
            "--seed",
            "7",
            "--schedule",
            "bands",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, SceneChoice::SimpleLight);
        assert_eq!(args.output, PathBuf::from("light.png"));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(64));
        assert_eq!(args.depth, Some(8));
        assert_eq!(args.seed, Some(7));
        assert_eq!(Schedule::from(args.schedule), Schedule::RowBands);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_scene() {
        assert!(Args::try_parse_from(["prism", "--scene", "teapot"]).is_err());
    }
}

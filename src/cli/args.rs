// PoseMatch 🕺 MIT License

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Play Options:
    --poses, -p <POSES>      Recorded pose stream (JSON lines, one detection pass per line)
    --targets, -t <TARGETS>  Target pose files, one per level, or a single directory
    --conf <CONF>            Keypoint confidence gate [default: 0.3]
    --threshold <THRESHOLD>  Similarity score required to clear a level [default: 80]
    --fps <FPS>              Pose evaluations per second [default: 10]
    --width <WIDTH>          Reference frame width in pixels [default: 640]
    --height <HEIGHT>        Reference frame height in pixels [default: 480]
    --save <DIR>             Save target skeleton previews as PNGs
    --verbose                Show verbose output

Examples:
    pose-match play --poses session.jsonl --targets targets/
    pose-match play -p session.jsonl -t level1.json level2.json level3.json
    pose-match play -p session.jsonl -t targets/ --threshold 90 --fps 5"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game over a recorded pose stream
    Play(PlayArgs),
}

/// Arguments for the play command.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Recorded pose stream (JSON lines, one detection pass per line)
    #[arg(short, long)]
    pub poses: PathBuf,

    /// Target pose files, one per level, or a single directory
    #[arg(short, long, num_args = 1.., required = true)]
    pub targets: Vec<PathBuf>,

    /// Keypoint confidence gate
    #[arg(long, default_value_t = 0.3)]
    pub conf: f32,

    /// Similarity score required to clear a level
    #[arg(long, default_value_t = 80.0)]
    pub threshold: f32,

    /// Pose evaluations per second
    #[arg(long, default_value_t = 10.0)]
    pub fps: f32,

    /// Reference frame width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Reference frame height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Save target skeleton previews as PNGs into this directory
    #[cfg(feature = "annotate")]
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

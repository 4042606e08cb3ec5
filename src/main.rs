// PoseMatch 🕺 MIT License

use clap::Parser;

use pose_match::cli::args::{Cli, Commands};
use pose_match::cli::play;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run_play(&args),
    }
}

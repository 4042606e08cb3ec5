// PoseMatch 🕺 MIT License

//! Command-line interface for playing recorded games.

pub mod args;
pub mod logging;
pub mod play;

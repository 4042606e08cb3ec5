// PoseMatch 🕺 MIT License

//! # PoseMatch Game Engine
//!
//! A pose-matching game engine written in Rust: score live skeleton
//! observations against a sequence of target poses and progress through
//! levels until the run is complete.
//!
//! The engine does not detect poses, open cameras, or draw UI. Those are
//! collaborator seams: anything producing [`Skeleton`] observations plugs in
//! through [`PoseDetector`], targets arrive through [`TargetLoader`], and
//! every visible effect leaves through [`GameSink`]. Recorded-stream
//! implementations of the first two ship in the crate, so games are fully
//! playable (and testable) from captured pose data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pose_match::{
//!     GameConfig, GameEngine, GameRunner, NullSink, ReplayDetector, ReplayTargets, StopHandle,
//! };
//!
//! fn main() -> pose_match::Result<()> {
//!     // One JSON skeleton file per level, a JSON-lines file for the live side.
//!     let targets = ReplayTargets::from_paths(vec![
//!         "targets/1.json".into(),
//!         "targets/2.json".into(),
//!     ])?;
//!     let detector = ReplayDetector::from_path("session.jsonl")?;
//!
//!     let engine = GameEngine::new(GameConfig::default(), targets, NullSink);
//!     let mut runner = GameRunner::new(engine, detector, StopHandle::new());
//!     let status = runner.run()?;
//!     println!("finished with status {status:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the engine directly
//!
//! The engine performs no scheduling of its own; a tick takes the detected
//! skeletons and the current time, which makes transitions easy to test:
//!
//! ```
//! use std::time::Instant;
//! use pose_match::{GameConfig, GameEngine, NullSink, TickOutcome};
//! # use pose_match::{Result, Skeleton, TargetLoader};
//! # struct OneLevel(Skeleton);
//! # impl TargetLoader for OneLevel {
//! #     fn level_count(&self) -> usize { 1 }
//! #     fn load_target(&mut self, _level: usize) -> Result<Option<Skeleton>> {
//! #         Ok(Some(self.0.clone()))
//! #     }
//! # }
//! # use pose_match::{Keypoint, KeypointName};
//! # let pose = Skeleton::new(vec![Keypoint::new(KeypointName::Nose, 10.0, 10.0, 0.9)]);
//! let mut engine = GameEngine::new(GameConfig::default(), OneLevel(pose.clone()), NullSink);
//! let now = Instant::now();
//! engine.start(now);
//! assert!(matches!(
//!     engine.tick(&[pose], now),
//!     TickOutcome::Completed { .. }
//! ));
//! ```
//!
//! ## Scoring
//!
//! Similarity compares 13 body landmarks (eyes and ears are drawn but never
//! scored), gates each pair on detector confidence, and decays linearly
//! with pixel distance over the reference frame diagonal. The metric is
//! intentionally scale- and position-sensitive; see [`scoring`].
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`keypoint`] | [`Skeleton`], [`Keypoint`], and the landmark vocabulary |
//! | [`scoring`] | Similarity metric and progress clamping/rounding |
//! | [`config`] | [`GameConfig`] builder |
//! | [`engine`] | [`GameEngine`] state machine |
//! | [`detector`] | [`PoseDetector`] seam, array adapter, replay streams |
//! | [`targets`] | [`TargetLoader`] seam and per-level target files |
//! | [`sink`] | [`GameSink`] presentation seam |
//! | [`runner`] | [`GameRunner`] cooperative loop and [`StopHandle`] |
//! | [`annotate`] | Skeleton overlay drawing (feature `annotate`) |
//! | [`error`] | Error types ([`GameError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Skeleton overlay rendering on frames (default) |

// Modules
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod cli;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod keypoint;
pub mod runner;
pub mod scoring;
pub mod sink;
pub mod targets;

// Re-export main types for convenience
pub use config::GameConfig;
pub use detector::{PoseDetector, ReplayDetector, skeletons_from_array};
pub use engine::{GameEngine, GameState, GameStatus, TickOutcome, format_clock};
pub use error::{GameError, Result};
pub use keypoint::{Keypoint, KeypointName, SCORED_KEYPOINTS, SKELETON_EDGES, Skeleton};
pub use runner::{GameRunner, StopHandle};
pub use scoring::{clamp_progress, display_percent, pose_similarity};
pub use sink::{GameSink, NullSink};
pub use targets::{ReplayTargets, TargetLoader, TargetSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

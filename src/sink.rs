// PoseMatch 🕺 MIT License

//! Presentation sink for game events.
//!
//! The engine never draws or prints; every externally visible effect goes
//! through [`GameSink`]. All methods default to no-ops so a sink implements
//! only what its surface shows.

/// Observer for externally visible game state changes.
pub trait GameSink {
    /// Progress changed: `fill` is the clamped score in `[0, 100]` driving a
    /// continuous indicator, `percent` the rounded integer shown as text.
    fn on_progress(&mut self, fill: f32, percent: u8) {
        let _ = (fill, percent);
    }

    /// The current level changed (1-based).
    fn on_level(&mut self, level: usize) {
        let _ = level;
    }

    /// The display clock ticked; `elapsed` is formatted `MM:SS`.
    fn on_clock(&mut self, elapsed: &str) {
        let _ = elapsed;
    }

    /// The last level was cleared; `total` is the run time as `MM:SS`.
    fn on_completed(&mut self, total: &str) {
        let _ = total;
    }

    /// The game was reset to its initial configuration.
    fn on_reset(&mut self) {}
}

/// A sink that discards every event. Useful for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl GameSink for NullSink {}

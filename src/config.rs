// PoseMatch 🕺 MIT License

//! Game configuration.
//!
//! [`GameConfig`] controls the scoring gates and pacing of a game. It uses a
//! builder pattern for convenient construction.

use std::time::Duration;

/// Configuration for a pose-matching game.
///
/// # Example
///
/// ```rust
/// use pose_match::GameConfig;
///
/// let config = GameConfig::new()
///     .with_confidence_gate(0.3)
///     .with_advance_threshold(80.0)
///     .with_frame(640, 480);
/// ```
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Minimum keypoint confidence for a landmark pair to count toward the
    /// similarity score. Strictly greater-than; low-confidence detections
    /// must not corrupt the aggregate.
    pub confidence_gate: f32,
    /// Similarity score (0.0 to 100.0) at or above which a tick advances to
    /// the next level.
    pub advance_threshold: f32,
    /// Reference capture frame width in pixels.
    pub frame_width: u32,
    /// Reference capture frame height in pixels.
    pub frame_height: u32,
    /// Period of the pose-evaluation tick.
    pub eval_interval: Duration,
    /// Period of the display clock tick.
    pub clock_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            confidence_gate: 0.3,
            advance_threshold: 80.0,
            frame_width: 640,
            frame_height: 480,
            eval_interval: Duration::from_millis(100),
            clock_interval: Duration::from_secs(1),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keypoint confidence gate.
    #[must_use]
    pub const fn with_confidence_gate(mut self, gate: f32) -> Self {
        self.confidence_gate = gate;
        self
    }

    /// Set the level-advance similarity threshold.
    #[must_use]
    pub const fn with_advance_threshold(mut self, threshold: f32) -> Self {
        self.advance_threshold = threshold;
        self
    }

    /// Set the reference capture frame size in pixels.
    ///
    /// Per-landmark similarity decays linearly from 100 at distance zero to
    /// 0 at the diagonal of this frame.
    #[must_use]
    pub const fn with_frame(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    /// Set the pose-evaluation tick period.
    #[must_use]
    pub const fn with_eval_interval(mut self, interval: Duration) -> Self {
        self.eval_interval = interval;
        self
    }

    /// Set the display clock period.
    #[must_use]
    pub const fn with_clock_interval(mut self, interval: Duration) -> Self {
        self.clock_interval = interval;
        self
    }

    /// Diagonal of the reference frame in pixels, the distance at which a
    /// landmark pair contributes zero similarity.
    #[must_use]
    pub fn frame_diagonal(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let (w, h) = (self.frame_width as f32, self.frame_height as f32);
        w.hypot(h)
    }
}

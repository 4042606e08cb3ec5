// PoseMatch 🕺 MIT License

//! Cooperative game loop.
//!
//! [`GameRunner`] drives a [`GameEngine`] with the two periodic activities
//! of a running game: the pose-evaluation tick (default 10 per second) and
//! the display clock (default 1 per second). Everything runs on the calling
//! thread; at most one detection call is ever in flight, so the engine's
//! target state is only mutated between ticks.
//!
//! Stopping is unconditional and immediate: once a [`StopHandle`] fires, a
//! detection result that was in flight is discarded without touching game
//! state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use crate::detector::PoseDetector;
use crate::engine::{GameEngine, GameStatus, TickOutcome};
use crate::error::{GameError, Result};
use crate::sink::GameSink;
use crate::targets::TargetLoader;

/// Shared cancellation flag for a running game loop.
///
/// Clone it into signal handlers or UI callbacks; every clone stops the
/// same loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Create a handle in the not-stopped state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an immediate stop.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Drives one game from start to completion, stop, or stream end.
pub struct GameRunner<D, L, S> {
    engine: GameEngine<L, S>,
    detector: D,
    stop: StopHandle,
}

impl<D: PoseDetector, L: TargetLoader, S: GameSink> GameRunner<D, L, S> {
    /// Create a runner over an idle engine and a ready detector.
    pub fn new(engine: GameEngine<L, S>, detector: D, stop: StopHandle) -> Self {
        Self {
            engine,
            detector,
            stop,
        }
    }

    /// Start the game and loop until it completes, the stop handle fires,
    /// or a finite pose stream runs out.
    ///
    /// Returns the final status: `Completed` for a cleared game, `Running`
    /// when the loop was stopped or the recording ended mid-game.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine was not ready to start or the
    /// detector failed with anything other than end-of-stream.
    pub fn run(&mut self) -> Result<GameStatus> {
        if !self.engine.start(Instant::now()) {
            return Err(GameError::ConfigError(
                "game is not ready to start; reset it first".to_string(),
            ));
        }

        let eval_interval = self.engine.config().eval_interval;
        let clock_interval = self.engine.config().clock_interval;
        let mut last_clock = Instant::now();

        while !self.stop.is_stopped() {
            let tick_started = Instant::now();

            let detections = match self.detector.estimate() {
                Ok(detections) => detections,
                Err(GameError::StreamEnded) => break,
                Err(e) => return Err(e),
            };
            // A stop issued while detection was in flight: the result is
            // stale and must not mutate state.
            if self.stop.is_stopped() {
                break;
            }

            if let TickOutcome::Completed { .. } = self.engine.tick(&detections, Instant::now()) {
                break;
            }

            let now = Instant::now();
            if now.duration_since(last_clock) >= clock_interval {
                self.engine.emit_clock(now);
                last_clock = now;
            }

            let spent = tick_started.elapsed();
            if spent < eval_interval {
                thread::sleep(eval_interval - spent);
            }
        }

        Ok(self.engine.status())
    }

    /// The engine being driven.
    #[must_use]
    pub fn engine(&self) -> &GameEngine<L, S> {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to reset between runs.
    pub fn engine_mut(&mut self) -> &mut GameEngine<L, S> {
        &mut self.engine
    }

    /// Consume the runner and recover the engine.
    #[must_use]
    pub fn into_engine(self) -> GameEngine<L, S> {
        self.engine
    }
}

// PoseMatch 🕺 MIT License

//! Game state machine.
//!
//! [`GameEngine`] owns the one mutable state bundle of a game (level index,
//! status, start time, current target) and applies every transition: start,
//! per-tick evaluation, level advance, completion, reset. It performs no
//! scheduling and no I/O of its own; observations and the current time
//! arrive as arguments, targets come from a [`TargetLoader`], and every
//! visible effect leaves through a [`GameSink`]. Tests drive transitions
//! synchronously.

use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::keypoint::Skeleton;
use crate::scoring::{clamp_progress, display_percent, pose_similarity};
use crate::sink::GameSink;
use crate::targets::TargetLoader;
use crate::verbose;

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Created or reset; waiting for start.
    Idle,
    /// Evaluating ticks and advancing levels.
    Running,
    /// The last level's threshold was met; terminal until reset.
    Completed,
}

/// The engine's mutable core state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Zero-based index of the level being played.
    pub level_index: usize,
    /// Lifecycle position.
    pub status: GameStatus,
    /// Set on start, cleared on reset.
    pub started_at: Option<Instant>,
    /// Reference skeleton for the current level, when one is available.
    pub target: Option<Skeleton>,
}

impl GameState {
    fn initial(target: Option<Skeleton>) -> Self {
        Self {
            level_index: 0,
            status: GameStatus::Idle,
            started_at: None,
            target,
        }
    }
}

/// What one evaluation tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The game is not running; nothing evaluated.
    Skipped,
    /// The detector saw nothing this tick.
    NoDetection,
    /// No target skeleton is available for the current level.
    NoTarget,
    /// Scored below the advance threshold; progress was reported.
    Scored(f32),
    /// The threshold was met and the game moved to `level` (1-based).
    Advanced {
        /// The score that cleared the level.
        score: f32,
        /// New 1-based level number.
        level: usize,
    },
    /// The final level was cleared.
    Completed {
        /// The score that cleared the last level.
        score: f32,
        /// Total run time, start to final advance.
        total: Duration,
    },
}

/// Pose-matching game engine.
///
/// Generic over its target source and presentation sink so transitions are
/// directly unit-testable without a rendering environment.
pub struct GameEngine<L, S> {
    config: GameConfig,
    loader: L,
    sink: S,
    state: GameState,
    progress: f32,
    total_time: Option<Duration>,
}

impl<L: TargetLoader, S: GameSink> GameEngine<L, S> {
    /// Create an engine and load the target for level 0.
    ///
    /// A level-0 target that is absent (or fails to load) is logged and
    /// played without scoring, matching every later level load.
    pub fn new(config: GameConfig, mut loader: L, sink: S) -> Self {
        let target = fetch_target(&mut loader, 0);
        Self {
            config,
            loader,
            sink,
            state: GameState::initial(target),
            progress: 0.0,
            total_time: None,
        }
    }

    /// Start the game.
    ///
    /// Returns `false` without side effects unless the engine is idle; a
    /// running or completed game cannot be started again.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state.status != GameStatus::Idle {
            return false;
        }
        self.state.status = GameStatus::Running;
        self.state.started_at = Some(now);
        true
    }

    /// Evaluate one detection pass against the current target.
    ///
    /// Only the first skeleton of a multi-person detection is considered.
    /// Absence of a detection or of a target is a silent skip. A score at
    /// or above the advance threshold moves the game forward, possibly to
    /// completion.
    pub fn tick(&mut self, detections: &[Skeleton], now: Instant) -> TickOutcome {
        if self.state.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }
        let Some(current) = detections.first() else {
            return TickOutcome::NoDetection;
        };
        let score = {
            let Some(target) = self.state.target.as_ref() else {
                return TickOutcome::NoTarget;
            };
            pose_similarity(current, target, &self.config)
        };

        self.report_progress(score);

        if score >= self.config.advance_threshold {
            self.advance(score, now)
        } else {
            TickOutcome::Scored(score)
        }
    }

    /// Reset to the initial configuration. Safe from any status.
    pub fn reset(&mut self) {
        self.state = GameState::initial(fetch_target(&mut self.loader, 0));
        self.total_time = None;
        self.report_progress(0.0);
        self.sink.on_level(1);
        self.sink.on_reset();
    }

    /// Emit the running clock through the sink, formatted `MM:SS`.
    ///
    /// Display only; no state changes. A no-op unless the game is running.
    pub fn emit_clock(&mut self, now: Instant) {
        if self.state.status != GameStatus::Running {
            return;
        }
        if let Some(elapsed) = self.elapsed(now) {
            self.sink.on_clock(&format_clock(elapsed));
        }
    }

    fn advance(&mut self, score: f32, now: Instant) -> TickOutcome {
        self.state.level_index += 1;

        if self.state.level_index >= self.loader.level_count() {
            self.state.status = GameStatus::Completed;
            let total = self
                .state
                .started_at
                .map(|started| now.duration_since(started))
                .unwrap_or_default();
            self.total_time = Some(total);
            self.sink.on_completed(&format_clock(total));
            return TickOutcome::Completed { score, total };
        }

        self.report_progress(0.0);
        let level = self.state.level_index + 1;
        self.sink.on_level(level);
        self.state.target = fetch_target(&mut self.loader, self.state.level_index);
        TickOutcome::Advanced { score, level }
    }

    fn report_progress(&mut self, raw: f32) {
        let clamped = clamp_progress(raw);
        self.progress = clamped;
        self.sink.on_progress(clamped, display_percent(clamped));
    }

    /// The configuration this engine scores and paces with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// 1-based level number for display, capped at the last level.
    #[must_use]
    pub fn level_number(&self) -> usize {
        let last = self.loader.level_count().saturating_sub(1);
        self.state.level_index.min(last) + 1
    }

    /// Number of levels in the configured target set.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.loader.level_count()
    }

    /// Clamped score in `[0, 100]` driving the continuous indicator.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Rounded integer percent shown to the player.
    #[must_use]
    pub fn displayed_percent(&self) -> u8 {
        display_percent(self.progress)
    }

    /// Reference skeleton for the current level, if one loaded.
    #[must_use]
    pub fn target(&self) -> Option<&Skeleton> {
        self.state.target.as_ref()
    }

    /// Time since start, while started.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.state
            .started_at
            .map(|started| now.duration_since(started))
    }

    /// Total run time, available once completed.
    #[must_use]
    pub fn total_time(&self) -> Option<Duration> {
        self.total_time
    }

    /// Whether the start control should be enabled.
    #[must_use]
    pub fn start_allowed(&self) -> bool {
        self.state.status == GameStatus::Idle
    }

    /// Whether the reset control should be enabled.
    #[must_use]
    pub fn reset_allowed(&self) -> bool {
        self.state.status != GameStatus::Idle
    }
}

fn fetch_target<L: TargetLoader>(loader: &mut L, level: usize) -> Option<Skeleton> {
    match loader.load_target(level) {
        Ok(Some(skeleton)) => Some(skeleton),
        Ok(None) => {
            verbose!("no target pose available for level {}", level + 1);
            None
        }
        Err(e) => {
            verbose!("failed to load target for level {}: {e}", level + 1);
            None
        }
    }
}

/// Format a duration as zero-padded `MM:SS`.
///
/// Minutes are not wrapped; an hour-long run reads `60:00`.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::keypoint::{Keypoint, KeypointName, SCORED_KEYPOINTS};
    use crate::sink::NullSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Loader over in-memory targets that records which levels were asked for.
    struct FakeLoader {
        targets: Vec<Option<Skeleton>>,
        requested: Rc<RefCell<Vec<usize>>>,
    }

    impl FakeLoader {
        fn new(targets: Vec<Option<Skeleton>>) -> Self {
            Self {
                targets,
                requested: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl TargetLoader for FakeLoader {
        fn level_count(&self) -> usize {
            self.targets.len()
        }

        fn load_target(&mut self, level: usize) -> Result<Option<Skeleton>> {
            self.requested.borrow_mut().push(level);
            Ok(self.targets.get(level).cloned().flatten())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Progress(u8),
        Level(usize),
        Clock(String),
        Completed(String),
        Reset,
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl GameSink for RecordingSink {
        fn on_progress(&mut self, _fill: f32, percent: u8) {
            self.events.borrow_mut().push(Event::Progress(percent));
        }
        fn on_level(&mut self, level: usize) {
            self.events.borrow_mut().push(Event::Level(level));
        }
        fn on_clock(&mut self, elapsed: &str) {
            self.events.borrow_mut().push(Event::Clock(elapsed.to_string()));
        }
        fn on_completed(&mut self, total: &str) {
            self.events
                .borrow_mut()
                .push(Event::Completed(total.to_string()));
        }
        fn on_reset(&mut self) {
            self.events.borrow_mut().push(Event::Reset);
        }
    }

    fn nose_skeleton(x: f32) -> Skeleton {
        Skeleton::new(vec![Keypoint::new(KeypointName::Nose, x, 0.0, 0.9)])
    }

    fn full_skeleton() -> Skeleton {
        Skeleton::new(
            SCORED_KEYPOINTS
                .iter()
                .map(|&name| Keypoint::new(name, 100.0, 100.0, 0.9))
                .collect(),
        )
    }

    /// Engine with `levels` copies of the same nose-at-origin target.
    fn engine_with_levels(
        levels: usize,
    ) -> (GameEngine<FakeLoader, RecordingSink>, Rc<RefCell<Vec<Event>>>, Rc<RefCell<Vec<usize>>>)
    {
        let loader = FakeLoader::new(vec![Some(nose_skeleton(0.0)); levels]);
        let requested = Rc::clone(&loader.requested);
        let sink = RecordingSink::default();
        let events = Rc::clone(&sink.events);
        (
            GameEngine::new(GameConfig::default(), loader, sink),
            events,
            requested,
        )
    }

    #[test]
    fn test_start_guard() {
        let (mut engine, _, _) = engine_with_levels(4);
        let t0 = Instant::now();
        assert!(engine.start_allowed());
        assert!(!engine.reset_allowed());
        assert!(engine.start(t0));
        assert!(!engine.start(t0));
        assert_eq!(engine.status(), GameStatus::Running);
        assert!(!engine.start_allowed());
        assert!(engine.reset_allowed());
    }

    #[test]
    fn test_tick_skipped_unless_running() {
        let (mut engine, _, _) = engine_with_levels(4);
        let outcome = engine.tick(&[nose_skeleton(0.0)], Instant::now());
        assert_eq!(outcome, TickOutcome::Skipped);
        assert_eq!(engine.displayed_percent(), 0);
    }

    #[test]
    fn test_empty_detection_leaves_state_unchanged() {
        let (mut engine, events, _) = engine_with_levels(4);
        let t0 = Instant::now();
        engine.start(t0);
        events.borrow_mut().clear();

        let outcome = engine.tick(&[], t0);
        assert_eq!(outcome, TickOutcome::NoDetection);
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.displayed_percent(), 0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_absent_target_skips_scoring() {
        let loader = FakeLoader::new(vec![None, Some(nose_skeleton(0.0))]);
        let sink = RecordingSink::default();
        let events = Rc::clone(&sink.events);
        let mut engine = GameEngine::new(GameConfig::default(), loader, sink);
        let t0 = Instant::now();
        engine.start(t0);
        events.borrow_mut().clear();

        let outcome = engine.tick(&[nose_skeleton(0.0)], t0);
        assert_eq!(outcome, TickOutcome::NoTarget);
        assert_eq!(engine.level_number(), 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_threshold_boundary() {
        // One valid pair; similarity = 100 - distance / 8 on a 640x480 frame.
        let (mut engine, _, _) = engine_with_levels(4);
        let t0 = Instant::now();
        engine.start(t0);

        // Just under 80: reported, not advanced.
        let outcome = engine.tick(&[nose_skeleton(160.08)], t0);
        match outcome {
            TickOutcome::Scored(score) => assert!(score < 80.0 && score > 79.9),
            other => panic!("expected Scored, got {other:?}"),
        }
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.displayed_percent(), 80); // 79.99 rounds up for display

        // Exactly 80: advances.
        let outcome = engine.tick(&[nose_skeleton(160.0)], t0);
        assert_eq!(
            outcome,
            TickOutcome::Advanced {
                score: 80.0,
                level: 2
            }
        );
        assert_eq!(engine.level_number(), 2);
        // Progress resets for the new level.
        assert_eq!(engine.displayed_percent(), 0);
    }

    #[test]
    fn test_full_run_completes_without_extra_load() {
        let (mut engine, events, requested) = engine_with_levels(4);
        let t0 = Instant::now();
        engine.start(t0);

        for level in 1..4u64 {
            let outcome = engine.tick(&[nose_skeleton(0.0)], t0 + Duration::from_secs(level));
            assert!(matches!(outcome, TickOutcome::Advanced { .. }));
        }
        let outcome = engine.tick(&[nose_skeleton(0.0)], t0 + Duration::from_secs(65));
        assert_eq!(
            outcome,
            TickOutcome::Completed {
                score: 100.0,
                total: Duration::from_secs(65)
            }
        );
        assert_eq!(engine.status(), GameStatus::Completed);
        assert_eq!(engine.total_time(), Some(Duration::from_secs(65)));
        assert!(!engine.start_allowed());
        assert!(engine.reset_allowed());

        // Levels 0 through 3 were loaded; no 5th target was requested.
        assert_eq!(*requested.borrow(), vec![0, 1, 2, 3]);
        assert!(events.borrow().contains(&Event::Completed("01:05".to_string())));

        // Ticks after completion are skipped.
        let outcome = engine.tick(&[nose_skeleton(0.0)], t0 + Duration::from_secs(66));
        assert_eq!(outcome, TickOutcome::Skipped);
    }

    #[test]
    fn test_reset_from_completed() {
        let (mut engine, events, _) = engine_with_levels(2);
        let t0 = Instant::now();
        engine.start(t0);
        engine.tick(&[nose_skeleton(0.0)], t0);
        engine.tick(&[nose_skeleton(0.0)], t0);
        assert_eq!(engine.status(), GameStatus::Completed);

        events.borrow_mut().clear();
        engine.reset();

        assert_eq!(engine.status(), GameStatus::Idle);
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.displayed_percent(), 0);
        assert!(engine.start_allowed());
        assert!(!engine.reset_allowed());
        assert!(engine.total_time().is_none());
        assert!(engine.elapsed(Instant::now()).is_none());
        let recorded = events.borrow();
        assert!(recorded.contains(&Event::Reset));
        assert!(recorded.contains(&Event::Progress(0)));
        assert!(recorded.contains(&Event::Level(1)));
    }

    #[test]
    fn test_reset_while_running_and_idle() {
        let (mut engine, _, _) = engine_with_levels(3);
        let t0 = Instant::now();
        engine.start(t0);
        engine.tick(&[nose_skeleton(0.0)], t0);
        assert_eq!(engine.level_number(), 2);

        engine.reset();
        assert_eq!(engine.status(), GameStatus::Idle);
        assert_eq!(engine.level_number(), 1);

        // Resetting an idle game is also fine.
        engine.reset();
        assert_eq!(engine.status(), GameStatus::Idle);
    }

    #[test]
    fn test_multi_person_uses_first_skeleton() {
        let (mut engine, _, _) = engine_with_levels(4);
        let t0 = Instant::now();
        engine.start(t0);

        // First skeleton matches, second is far off.
        let outcome = engine.tick(&[nose_skeleton(0.0), full_skeleton()], t0);
        assert!(matches!(outcome, TickOutcome::Advanced { .. }));
    }

    #[test]
    fn test_emit_clock() {
        let (mut engine, events, _) = engine_with_levels(4);
        let t0 = Instant::now();

        // Idle: no clock.
        engine.emit_clock(t0);
        assert!(events.borrow().iter().all(|e| !matches!(*e, Event::Clock(_))));

        engine.start(t0);
        engine.emit_clock(t0 + Duration::from_secs(83));
        assert!(events
            .borrow()
            .contains(&Event::Clock("01:23".to_string())));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(5)), "00:05");
        assert_eq!(format_clock(Duration::from_secs(65)), "01:05");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_null_sink_runs() {
        let loader = FakeLoader::new(vec![Some(nose_skeleton(0.0))]);
        let mut engine = GameEngine::new(GameConfig::default(), loader, NullSink);
        let t0 = Instant::now();
        engine.start(t0);
        let outcome = engine.tick(&[nose_skeleton(0.0)], t0);
        assert!(matches!(outcome, TickOutcome::Completed { .. }));
    }
}

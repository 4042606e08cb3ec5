// PoseMatch 🕺 MIT License

use std::io::Write;
use std::process;
use std::time::Duration;

use crate::cli::args::PlayArgs;
use crate::cli::logging;
use crate::config::GameConfig;
use crate::detector::ReplayDetector;
use crate::engine::{GameEngine, GameStatus, format_clock};
use crate::runner::{GameRunner, StopHandle};
use crate::sink::GameSink;
use crate::targets::{ReplayTargets, TargetLoader, TargetSource};
use crate::{error, info, success, warn};

/// Sink that renders the game as a single rewritten terminal line.
struct ConsoleSink {
    level_count: usize,
    level: usize,
    clock: String,
    percent: u8,
}

impl ConsoleSink {
    fn new(level_count: usize) -> Self {
        Self {
            level_count,
            level: 1,
            clock: "00:00".to_string(),
            percent: 0,
        }
    }

    fn redraw(&self) {
        print!(
            "\r  [{}] level {}/{}  match {:>3}%   ",
            self.clock, self.level, self.level_count, self.percent
        );
        let _ = std::io::stdout().flush();
    }
}

impl GameSink for ConsoleSink {
    fn on_progress(&mut self, _fill: f32, percent: u8) {
        self.percent = percent;
        self.redraw();
    }

    fn on_level(&mut self, level: usize) {
        if level > self.level {
            println!();
            info!("level {} cleared!", self.level);
        }
        self.level = level;
        self.redraw();
    }

    fn on_clock(&mut self, elapsed: &str) {
        self.clock = elapsed.to_string();
        self.redraw();
    }

    fn on_completed(&mut self, total: &str) {
        println!();
        success!("all {} poses matched in {}", self.level_count, total);
    }

    fn on_reset(&mut self) {
        self.level = 1;
        self.clock = "00:00".to_string();
        self.percent = 0;
    }
}

/// Render each level's target skeleton to a PNG preview.
#[cfg(feature = "annotate")]
fn save_target_previews(
    targets: &mut ReplayTargets,
    config: &GameConfig,
    dir: &std::path::Path,
) -> crate::error::Result<()> {
    use crate::error::GameError;
    use crate::verbose;

    std::fs::create_dir_all(dir)?;
    for level in 0..targets.level_count() {
        let Some(skeleton) = targets.load_target(level)? else {
            continue;
        };
        let img = crate::annotate::render_skeleton(
            &skeleton,
            config.frame_width,
            config.frame_height,
            config.confidence_gate,
        );
        let path = dir.join(format!("level_{}.png", level + 1));
        img.save(&path)
            .map_err(|e| GameError::TargetError(format!("cannot save {}: {e}", path.display())))?;
        verbose!("saved target preview {}", path.display());
    }
    Ok(())
}

/// Run a pose-matching game over recorded streams.
pub fn run_play(args: &PlayArgs) {
    logging::set_verbose(args.verbose);

    if args.fps <= 0.0 {
        error!("--fps must be positive");
        process::exit(1);
    }

    let config = GameConfig::new()
        .with_confidence_gate(args.conf)
        .with_advance_threshold(args.threshold)
        .with_frame(args.width, args.height)
        .with_eval_interval(Duration::from_secs_f32(1.0 / args.fps));

    let source = TargetSource::from_paths(args.targets.clone());
    #[allow(unused_mut)]
    let mut targets = match ReplayTargets::new(&source) {
        Ok(t) => t,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    #[cfg(feature = "annotate")]
    if let Some(dir) = &args.save {
        if let Err(e) = save_target_previews(&mut targets, &config, dir) {
            error!("{e}");
            process::exit(1);
        }
    }

    let detector = match ReplayDetector::from_path(&args.poses) {
        Ok(d) => d,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let stop = StopHandle::new();
    {
        let stop = stop.clone();
        if let Err(e) = ctrlc::set_handler(move || stop.stop()) {
            warn!("could not install Ctrl-C handler: {e}");
        }
    }

    let levels = targets.level_count();
    info!(
        "{} level{} loaded, matching at {:.0}% over {}",
        levels,
        if levels == 1 { "" } else { "s" },
        args.threshold,
        args.poses.display()
    );

    let engine = GameEngine::new(config, targets, ConsoleSink::new(levels));
    let mut runner = GameRunner::new(engine, detector, stop.clone());

    match runner.run() {
        Ok(GameStatus::Completed) => {
            // The sink already announced the finish line; repeat the total
            // for scripts scraping the last line.
            if let Some(total) = runner.engine().total_time() {
                info!("total time {}", format_clock(total));
            }
        }
        Ok(_) => {
            println!();
            if stop.is_stopped() {
                warn!("stopped at level {}", runner.engine().level_number());
            } else {
                warn!(
                    "pose stream ended at level {} before the game was complete",
                    runner.engine().level_number()
                );
            }
        }
        Err(e) => {
            println!();
            error!("{e}");
            process::exit(1);
        }
    }
}

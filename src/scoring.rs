// PoseMatch 🕺 MIT License

//! Pose similarity scoring.
//!
//! Compares a live skeleton against a target skeleton over the 13 scored
//! landmarks and aggregates per-landmark pixel proximity into a 0–100 score.
//!
//! The metric is deliberately scale- and position-sensitive: identical
//! shapes at different camera distances score low. Normalizing it would
//! change observable game difficulty.

use crate::config::GameConfig;
use crate::keypoint::{SCORED_KEYPOINTS, Skeleton};

/// Similarity of one landmark pair, given its pixel distance.
///
/// Linear decay from 100 (identical position) to 0 (distance at or beyond
/// `max_distance`).
#[must_use]
pub fn point_similarity(distance: f32, max_distance: f32) -> f32 {
    (100.0 - (distance / max_distance) * 100.0).max(0.0)
}

/// Compute the similarity score between a live and a target skeleton.
///
/// For each landmark in the scored set, the pair contributes only when both
/// skeletons carry it with confidence strictly above the gate. Valid pairs
/// contribute a linear-decay proximity over the reference frame diagonal;
/// the score is the arithmetic mean of the contributions, or 0 when no pair
/// is valid. Landmarks are unweighted.
///
/// # Returns
///
/// * A score in `[0, 100]`. Never panics, never divides by zero.
#[must_use]
pub fn pose_similarity(current: &Skeleton, target: &Skeleton, config: &GameConfig) -> f32 {
    let max_distance = config.frame_diagonal();
    let gate = config.confidence_gate;

    let mut total = 0.0_f32;
    let mut valid = 0_u32;

    for name in SCORED_KEYPOINTS {
        let (Some(current_kp), Some(target_kp)) = (current.get(name), target.get(name)) else {
            continue;
        };
        if current_kp.score <= gate || target_kp.score <= gate {
            continue;
        }

        total += point_similarity(current_kp.distance_to(target_kp), max_distance);
        valid += 1;
    }

    if valid > 0 {
        #[allow(clippy::cast_precision_loss)]
        let n = valid as f32;
        total / n
    } else {
        0.0
    }
}

/// Clamp a raw score into the displayable `[0, 100]` range.
///
/// Defensive and independent of [`pose_similarity`] already bounding its
/// output.
#[must_use]
pub fn clamp_progress(raw: f32) -> f32 {
    raw.clamp(0.0, 100.0)
}

/// Round a clamped score to the integer percent shown to the player.
#[must_use]
pub fn display_percent(clamped: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = clamped.round() as u8;
    percent
}

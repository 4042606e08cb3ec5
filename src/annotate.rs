// PoseMatch 🕺 MIT License

//! Skeleton overlay rendering.
//!
//! Draws a detected skeleton onto a frame: limb edges first, keypoint dots
//! on top. Landmarks at or below the confidence gate are not drawn, and an
//! edge needs both of its endpoints above the gate. Eyes and ears are drawn
//! even though scoring ignores them.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::keypoint::{SKELETON_EDGES, Skeleton};

/// Limb edge color.
pub const EDGE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Keypoint dot color.
pub const KEYPOINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Keypoint dot radius in pixels.
pub const KEYPOINT_RADIUS: i32 = 4;

/// Draw a skeleton onto an image in place.
pub fn draw_skeleton(img: &mut RgbImage, skeleton: &Skeleton, gate: f32) {
    for (a, b) in SKELETON_EDGES {
        let (Some(start), Some(end)) = (skeleton.get(a), skeleton.get(b)) else {
            continue;
        };
        if start.score <= gate || end.score <= gate {
            continue;
        }
        draw_line_segment_mut(img, (start.x, start.y), (end.x, end.y), EDGE_COLOR);
    }

    for kp in skeleton.iter() {
        if kp.score > gate {
            #[allow(clippy::cast_possible_truncation)]
            let center = (kp.x.round() as i32, kp.y.round() as i32);
            draw_filled_circle_mut(img, center, KEYPOINT_RADIUS, KEYPOINT_COLOR);
        }
    }
}

/// Return a copy of `frame` with the skeleton drawn on it.
#[must_use]
pub fn annotate_frame(frame: &DynamicImage, skeleton: &Skeleton, gate: f32) -> DynamicImage {
    let mut img = frame.to_rgb8();
    draw_skeleton(&mut img, skeleton, gate);
    DynamicImage::ImageRgb8(img)
}

/// Render a skeleton onto a blank canvas of the given size.
///
/// This is the overlay alone, the way a game surface composites it over
/// live video.
#[must_use]
pub fn render_skeleton(skeleton: &Skeleton, width: u32, height: u32, gate: f32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    draw_skeleton(&mut img, skeleton, gate);
    img
}

//! Gaze ratio
//!
//! Normalized iris position within the eye bounding box, averaged across
//! both eyes. 0.5 on each axis means centered gaze.

use landmark_feed::{mesh, LandmarkFrame};
use serde::{Deserialize, Serialize};

/// Ratio reported when the eye box is degenerate
pub const NEUTRAL_RATIO: f32 = 0.5;

/// Normalized gaze position, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeRatio {
    pub x: f32,
    pub y: f32,
}

impl Default for GazeRatio {
    fn default() -> Self {
        Self {
            x: NEUTRAL_RATIO,
            y: NEUTRAL_RATIO,
        }
    }
}

fn axis_ratio(value: f32, low: f32, high: f32) -> f32 {
    let span = high - low;
    if span.abs() <= f32::EPSILON {
        return NEUTRAL_RATIO;
    }
    ((value - low) / span).clamp(0.0, 1.0)
}

fn eye_gaze(frame: &LandmarkFrame, eye_box: &mesh::EyeBox, iris: usize) -> Option<GazeRatio> {
    let left = frame.point(eye_box.left)?;
    let right = frame.point(eye_box.right)?;
    let top = frame.point(eye_box.top)?;
    let bottom = frame.point(eye_box.bottom)?;
    let center = frame.point(iris)?;

    Some(GazeRatio {
        x: axis_ratio(center.x, left.x, right.x),
        y: axis_ratio(center.y, top.y, bottom.y),
    })
}

/// Gaze ratio averaged across both eyes
///
/// Frames without iris refinement points fall back to the neutral ratio.
pub fn gaze_ratio(frame: &LandmarkFrame) -> GazeRatio {
    let left = eye_gaze(frame, &mesh::LEFT_EYE_BOX, mesh::LEFT_IRIS_CENTER);
    let right = eye_gaze(frame, &mesh::RIGHT_EYE_BOX, mesh::RIGHT_IRIS_CENTER);

    match (left, right) {
        (Some(l), Some(r)) => GazeRatio {
            x: (l.x + r.x) / 2.0,
            y: (l.y + r.y) / 2.0,
        },
        (Some(g), None) | (None, Some(g)) => g,
        (None, None) => GazeRatio::default(),
    }
}

//! Head pose proxy estimation
//!
//! Pose angles are proxy units, not true degrees: a normalized facial ratio
//! scaled by [`POSE_PROXY_SCALE`]. Roll is a true angle in degrees.

use landmark_feed::{mesh, LandmarkFrame};
use serde::{Deserialize, Serialize};

/// Ratio-to-proxy-degree scale for yaw and pitch
pub const POSE_PROXY_SCALE: f32 = 50.0;

/// Head pose (yaw/pitch in proxy units, roll in degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    /// Left-right rotation
    pub yaw: f32,
    /// Up-down tilt
    pub pitch: f32,
    /// Side tilt
    pub roll: f32,
}

/// Estimate the head pose proxy from a landmark frame
///
/// Returns `None` on degenerate geometry (zero eye width or face height) so
/// the caller can skip the frame instead of feeding NaN into its filters.
pub fn estimate_head_pose(frame: &LandmarkFrame) -> Option<HeadPose> {
    let left_eye = frame.point(mesh::LEFT_EYE_OUTER)?;
    let right_eye = frame.point(mesh::RIGHT_EYE_OUTER)?;
    let nose = frame.point(mesh::NOSE_TIP)?;
    let chin = frame.point(mesh::CHIN)?;
    let forehead = frame.point(mesh::FOREHEAD)?;
    let mouth_left = frame.point(mesh::MOUTH_LEFT)?;
    let mouth_right = frame.point(mesh::MOUTH_RIGHT)?;

    let eye_center = left_eye.midpoint(right_eye);
    let eye_width = left_eye.distance_2d(right_eye);
    let face_height = chin.distance_2d(forehead);

    if eye_width <= f32::EPSILON || face_height <= f32::EPSILON {
        return None;
    }

    let yaw = ((nose.x - eye_center.x) / eye_width) * POSE_PROXY_SCALE;

    let mouth_center = mouth_left.midpoint(mouth_right);
    let pitch = ((mouth_center.y - eye_center.y) / face_height) * POSE_PROXY_SCALE;

    let roll = (right_eye.y - left_eye.y)
        .atan2(right_eye.x - left_eye.x)
        .to_degrees();

    Some(HeadPose { yaw, pitch, roll })
}

/// Nose tip position in the image plane, for the motion accumulator
pub fn nose_position(frame: &LandmarkFrame) -> Option<(f32, f32)> {
    frame.point(mesh::NOSE_TIP).map(|p| (p.x, p.y))
}

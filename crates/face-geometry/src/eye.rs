//! Eye aspect ratio (EAR)
//!
//! Standard 6-point EAR: `(|y2-y6| + |y3-y5|) / (2 * |x1-x4|)` where p1/p4
//! are the horizontal eye corners and p2/p3 (upper) pair with p6/p5 (lower).

use landmark_feed::{mesh, LandmarkFrame};

/// EAR for one eye given its 6-point ring
///
/// Returns `None` when the frame is short or the corner distance collapses
/// to zero (unreliable detection).
pub fn eye_aspect_ratio(frame: &LandmarkFrame, ring: &[usize; 6]) -> Option<f32> {
    let p1 = frame.point(ring[0])?;
    let p2 = frame.point(ring[1])?;
    let p3 = frame.point(ring[2])?;
    let p4 = frame.point(ring[3])?;
    let p5 = frame.point(ring[4])?;
    let p6 = frame.point(ring[5])?;

    let horizontal = (p1.x - p4.x).abs();
    if horizontal <= f32::EPSILON {
        return None;
    }

    let vertical = (p2.y - p6.y).abs() + (p3.y - p5.y).abs();
    Some(vertical / (2.0 * horizontal))
}

/// Average EAR of both eyes
pub fn average_ear(frame: &LandmarkFrame) -> Option<f32> {
    let left = eye_aspect_ratio(frame, &mesh::LEFT_EYE_EAR)?;
    let right = eye_aspect_ratio(frame, &mesh::RIGHT_EYE_EAR)?;
    Some((left + right) / 2.0)
}

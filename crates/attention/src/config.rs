//! Attention pipeline configuration

use serde::{Deserialize, Serialize};

/// Attention pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    /// Minimum face-detection confidence to treat a frame as valid
    pub min_face_score: f32,

    /// Valid frames collected before calibration completes
    pub calibration_frames: usize,

    /// Personal EAR threshold as a fraction of the calibrated mean
    pub ear_threshold_scale: f32,

    /// Lower bound for the personal EAR threshold
    pub ear_threshold_floor: f32,

    /// Exponential smoothing factor for head pose and nose position
    pub smoothing_alpha: f32,

    /// Positional deltas below this are treated as zero movement
    pub movement_deadzone: f32,

    /// Scale applied to positional deltas past the deadzone
    pub movement_scale: f32,

    /// Instantaneous movement above this increments the movement counter
    pub movement_threshold: f32,

    /// Movement counter value that must be exceeded to latch "moving"
    pub movement_latch: u32,

    /// Continuous eye closure beyond this duration classifies as sleeping (ms)
    pub eyes_closed_ms: u64,

    /// Smoothed yaw deviation (proxy units) beyond this classifies as unfocused
    pub yaw_unfocus_threshold: f32,

    /// Consecutive no-face frames that must be exceeded to classify as away
    pub face_missing_frames: u32,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            min_face_score: 0.5,
            calibration_frames: 30,
            ear_threshold_scale: 0.6,
            ear_threshold_floor: 0.10,
            smoothing_alpha: 0.15,
            movement_deadzone: 1.5,
            movement_scale: 1.0,
            movement_threshold: 2.0,
            movement_latch: 5,
            eyes_closed_ms: 2000,
            yaw_unfocus_threshold: 20.0,
            face_missing_frames: 30,
        }
    }
}

impl AttentionConfig {
    /// Create strict config (lower thresholds, faster escalation)
    pub fn strict() -> Self {
        Self {
            eyes_closed_ms: 1500,
            yaw_unfocus_threshold: 15.0,
            face_missing_frames: 20,
            ..Default::default()
        }
    }

    /// Create lenient config (higher thresholds)
    pub fn lenient() -> Self {
        Self {
            eyes_closed_ms: 3000,
            yaw_unfocus_threshold: 25.0,
            face_missing_frames: 45,
            ..Default::default()
        }
    }
}

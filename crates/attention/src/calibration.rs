//! Personal calibration
//!
//! Collects the first N valid frames of a session, during which the subject
//! is assumed attentive, and derives a personalized closed-eye EAR threshold.
//! The transition to calibrated is one-way; the threshold is never recomputed
//! mid-session.

use face_geometry::HeadPose;
use tracing::info;

use crate::AttentionConfig;

/// One calibration observation
#[derive(Debug, Clone, Copy)]
pub struct CalibrationSample {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub avg_ear: f32,
}

impl CalibrationSample {
    /// Build a sample from the frame's derived signals
    pub fn new(pose: HeadPose, avg_ear: f32) -> Self {
        Self {
            yaw: pose.yaw,
            pitch: pose.pitch,
            roll: pose.roll,
            avg_ear,
        }
    }
}

/// Per-session calibration state
#[derive(Debug, Clone)]
pub struct CalibrationProfile {
    samples: Vec<CalibrationSample>,
    target_frames: usize,
    threshold_scale: f32,
    threshold_floor: f32,
    ear_threshold: Option<f32>,
}

impl CalibrationProfile {
    /// Create an uncalibrated profile
    pub fn new(config: &AttentionConfig) -> Self {
        Self {
            samples: Vec::with_capacity(config.calibration_frames),
            target_frames: config.calibration_frames,
            threshold_scale: config.ear_threshold_scale,
            threshold_floor: config.ear_threshold_floor,
            ear_threshold: None,
        }
    }

    /// Whether calibration has completed
    pub fn is_calibrated(&self) -> bool {
        self.ear_threshold.is_some()
    }

    /// The personalized EAR threshold, once calibrated
    pub fn ear_threshold(&self) -> Option<f32> {
        self.ear_threshold
    }

    /// Valid frames collected so far
    pub fn progress(&self) -> usize {
        self.samples.len()
    }

    /// Append one valid-frame sample
    ///
    /// Returns the personal EAR threshold on the sample that completes
    /// calibration, and `None` on every other call. Samples added after
    /// completion are ignored.
    pub fn add_sample(&mut self, sample: CalibrationSample) -> Option<f32> {
        if self.is_calibrated() {
            return None;
        }

        self.samples.push(sample);
        if self.samples.len() < self.target_frames {
            return None;
        }

        let mean_ear =
            self.samples.iter().map(|s| s.avg_ear).sum::<f32>() / self.samples.len() as f32;
        let threshold = (mean_ear * self.threshold_scale).max(self.threshold_floor);
        self.ear_threshold = Some(threshold);

        info!(
            samples = self.samples.len(),
            mean_ear, threshold, "Calibration complete"
        );
        Some(threshold)
    }
}

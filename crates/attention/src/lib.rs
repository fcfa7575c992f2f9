//! Attention Inference Core
//!
//! Per-frame attention state inference from facial landmarks:
//! - Personalized calibration (closed-eye EAR threshold)
//! - Exponential smoothing of head pose and nose position
//! - Debounced movement accumulation
//! - Ordered status classification (away, sleeping, unfocused, focused)
//!
//! The monitor is level-triggered: it classifies every valid frame after
//! calibration. Edge-triggered publication is layered on top by the status
//! ledger.

pub mod analysis;
pub mod calibration;
pub mod config;
pub mod motion;
pub mod state;

pub use analysis::{FrameAnalysis, MonitorEvent};
pub use calibration::{CalibrationProfile, CalibrationSample};
pub use config::AttentionConfig;
pub use motion::{MotionSample, MotionTracker};
pub use state::{AttentionStatus, ClassifierState};

use face_geometry::{average_ear, estimate_head_pose, gaze_ratio, nose_position};
use landmark_feed::LandmarkFrame;
use tracing::debug;

/// Per-session attention monitor
///
/// Owns all frame-to-frame state: the calibration profile, the smoothing
/// and movement tracker, and the classifier counters. One instance per
/// student session; discarded at teardown.
pub struct AttentionMonitor {
    config: AttentionConfig,
    profile: CalibrationProfile,
    tracker: MotionTracker,
    state: ClassifierState,
}

impl AttentionMonitor {
    /// Create a monitor at the start of a session
    pub fn new(config: AttentionConfig) -> Self {
        Self {
            profile: CalibrationProfile::new(&config),
            tracker: MotionTracker::new(&config),
            state: ClassifierState::default(),
            config,
        }
    }

    /// Whether calibration has completed
    pub fn is_calibrated(&self) -> bool {
        self.profile.is_calibrated()
    }

    /// Calibration progress in valid frames
    pub fn calibration_progress(&self) -> usize {
        self.profile.progress()
    }

    /// Process one landmark frame
    ///
    /// Runs extraction, smoothing, and (once calibrated) classification.
    /// Steps are strictly ordered within the frame; classification is
    /// skipped entirely while calibrating.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameAnalysis {
        let mut analysis = FrameAnalysis {
            calibrating: !self.profile.is_calibrated(),
            ..Default::default()
        };

        if !frame.has_face(self.config.min_face_score) {
            return self.on_face_missing(analysis);
        }
        analysis.face_detected = true;
        self.state.face_missing_count = 0;

        // Degenerate geometry: skip this frame's motion and classification
        // rather than feeding NaN into the filters
        let (Some(pose), Some(avg_ear), Some(nose)) = (
            estimate_head_pose(frame),
            average_ear(frame),
            nose_position(frame),
        ) else {
            debug!(sequence = frame.sequence, "Skipping frame with degenerate geometry");
            return analysis;
        };

        analysis.head_pose = Some(pose);
        analysis.avg_ear = Some(avg_ear);
        analysis.gaze = Some(gaze_ratio(frame));

        if !self.profile.is_calibrated() {
            // Keep the nose filter warm so motion has continuity once
            // calibration ends
            self.tracker.observe_nose(nose);
            if let Some(threshold) = self
                .profile
                .add_sample(CalibrationSample::new(pose, avg_ear))
            {
                analysis
                    .events
                    .push(MonitorEvent::CalibrationComplete {
                        ear_threshold: threshold,
                    });
            }
            return analysis;
        }

        let Some(ear_threshold) = self.profile.ear_threshold() else {
            return analysis;
        };
        let eyes_open = avg_ear > ear_threshold;
        analysis.eyes_open = Some(eyes_open);

        let motion = self.tracker.update(pose, nose, eyes_open);
        analysis.status = Some(self.classify(frame.timestamp_ms, eyes_open, &motion));
        analysis
    }

    /// Discard all session state (screen/session teardown)
    pub fn reset(&mut self) {
        self.profile = CalibrationProfile::new(&self.config);
        self.tracker = MotionTracker::new(&self.config);
        self.state.reset();
    }

    fn on_face_missing(&mut self, mut analysis: FrameAnalysis) -> FrameAnalysis {
        // An absent face breaks eye-closure continuity
        self.state.eyes_closed_since = None;

        if !self.profile.is_calibrated() {
            // Calibration only progresses on valid face frames
            return analysis;
        }

        self.state.face_missing_count += 1;
        if self.state.face_missing_count > self.config.face_missing_frames {
            analysis.status = Some(AttentionStatus::Away);
        }
        analysis
    }

    /// Ordered classification, first match wins: absence has been handled
    /// already, then prolonged eye closure, then gaze deviation, then
    /// sustained movement
    fn classify(&mut self, now_ms: u64, eyes_open: bool, motion: &MotionSample) -> AttentionStatus {
        if eyes_open {
            self.state.eyes_closed_since = None;
        } else {
            let since = *self.state.eyes_closed_since.get_or_insert(now_ms);
            if now_ms.saturating_sub(since) > self.config.eyes_closed_ms {
                return AttentionStatus::Sleeping;
            }
        }

        if motion.smoothed_pose.yaw.abs() > self.config.yaw_unfocus_threshold {
            return AttentionStatus::Unfocus;
        }

        if motion.is_moving {
            return AttentionStatus::Unfocus;
        }

        AttentionStatus::Focus
    }
}

//! Per-frame analysis results and monitor events

use face_geometry::{GazeRatio, HeadPose};
use serde::{Deserialize, Serialize};

use crate::AttentionStatus;

/// One-shot events surfaced by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MonitorEvent {
    /// Calibration finished; carries the personalized EAR threshold
    CalibrationComplete { ear_threshold: f32 },
}

/// Complete analysis of one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether a face was detected in this frame
    pub face_detected: bool,

    /// Whether the session is still in its calibration phase
    pub calibrating: bool,

    /// Raw head pose (if geometry was extractable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_pose: Option<HeadPose>,

    /// Average eye aspect ratio of both eyes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ear: Option<f32>,

    /// Eyes-open judgement against the personal threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes_open: Option<bool>,

    /// Normalized gaze ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<GazeRatio>,

    /// Classified status; `None` while calibrating or when the frame
    /// carried no classifiable signal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttentionStatus>,

    /// One-shot events raised by this frame
    pub events: Vec<MonitorEvent>,
}

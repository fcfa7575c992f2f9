//! Face Geometry
//!
//! Pure per-frame signal extraction from a landmark frame:
//! - Head pose proxy (yaw, pitch, roll)
//! - Eye aspect ratio (blink / closed-eye detection)
//! - Normalized gaze ratio (iris position within the eye box)
//!
//! All extractors are side-effect free and safe to run every frame.
//! Degenerate geometry (zero-width denominators) yields `None` or a neutral
//! value, never NaN or infinity.

pub mod eye;
pub mod gaze;
pub mod pose;

pub use eye::{average_ear, eye_aspect_ratio};
pub use gaze::{gaze_ratio, GazeRatio, NEUTRAL_RATIO};
pub use pose::{estimate_head_pose, nose_position, HeadPose, POSE_PROXY_SCALE};

//! Landmark Feed
//!
//! Data model for the per-frame facial landmark stream produced by the
//! external face-mesh runtime:
//! - 3D landmark points with a fixed, closed index scheme (468 mesh + iris)
//! - Face-presence confidence gating
//! - Capture timestamps and sequence numbers for downstream duration checks

pub mod frame;
pub mod mesh;

pub use frame::{LandmarkFrame, Point3, DEFAULT_MIN_FACE_SCORE};

use thiserror::Error;

/// Landmark feed error types
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Frame has {actual} points, expected at least {expected}")]
    TooFewPoints { expected: usize, actual: usize },
}

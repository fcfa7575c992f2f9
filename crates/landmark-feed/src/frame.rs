//! Landmark frame types

use serde::{Deserialize, Serialize};

use crate::mesh;
use crate::FeedError;

/// Face-presence confidence below this means "no face in frame"
pub const DEFAULT_MIN_FACE_SCORE: f32 = 0.5;

/// A single 3D landmark point in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (z ignored)
    pub fn distance_2d(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint with another point
    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
}

/// One frame of facial landmarks from the external mesh runtime
///
/// Ephemeral: produced once per camera frame and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Ordered landmark points, index-addressable via [`crate::mesh`]
    pub points: Vec<Point3>,
    /// Face-detection confidence; `None` means no face in frame
    pub face_score: Option<f32>,
    /// Capture timestamp (milliseconds, monotonic per session)
    pub timestamp_ms: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl LandmarkFrame {
    /// Create a new landmark frame
    pub fn new(
        points: Vec<Point3>,
        face_score: Option<f32>,
        timestamp_ms: u64,
        sequence: u32,
    ) -> Self {
        Self {
            points,
            face_score,
            timestamp_ms,
            sequence,
        }
    }

    /// A frame with no detected face (empty landmark set)
    pub fn empty(timestamp_ms: u64, sequence: u32) -> Self {
        Self {
            points: Vec::new(),
            face_score: None,
            timestamp_ms,
            sequence,
        }
    }

    /// Whether a face is present at or above the given confidence
    pub fn has_face(&self, min_score: f32) -> bool {
        matches!(self.face_score, Some(score) if score >= min_score)
            && self.points.len() >= mesh::MESH_POINT_COUNT
    }

    /// Whether the frame carries the iris refinement points
    pub fn has_iris(&self) -> bool {
        self.points.len() >= mesh::POINT_COUNT
    }

    /// Get a landmark by mesh index
    pub fn point(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    /// Structural integrity check for frames from an untrusted source
    ///
    /// A frame claiming a face must carry a full mesh.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.face_score.is_some() && self.points.len() < mesh::MESH_POINT_COUNT {
            return Err(FeedError::TooFewPoints {
                expected: mesh::MESH_POINT_COUNT,
                actual: self.points.len(),
            });
        }
        Ok(())
    }
}

//! Face-mesh index scheme
//!
//! Fixed landmark indices for the 468-point face mesh with iris refinement
//! (478 points total). The set is closed: downstream geometry only ever
//! addresses the indices named here.

/// Points in the base face mesh
pub const MESH_POINT_COUNT: usize = 468;

/// Points including the 10 iris refinement landmarks
pub const POINT_COUNT: usize = 478;

/// Nose tip
pub const NOSE_TIP: usize = 1;

/// Chin bottom
pub const CHIN: usize = 152;

/// Forehead center
pub const FOREHEAD: usize = 10;

/// Outer corner of the left eye
pub const LEFT_EYE_OUTER: usize = 33;

/// Outer corner of the right eye
pub const RIGHT_EYE_OUTER: usize = 263;

/// Left mouth corner
pub const MOUTH_LEFT: usize = 61;

/// Right mouth corner
pub const MOUTH_RIGHT: usize = 291;

/// Left iris center
pub const LEFT_IRIS_CENTER: usize = 468;

/// Right iris center
pub const RIGHT_IRIS_CENTER: usize = 473;

/// 6-point eye ring for EAR: [outer corner, upper lid x2, inner corner, lower lid x2]
///
/// Ordered as the classic p1..p6 scheme: p1/p4 are the horizontal corners,
/// p2/p3 the upper lid, p5/p6 the lower lid.
pub const LEFT_EYE_EAR: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Right-eye counterpart of [`LEFT_EYE_EAR`]
pub const RIGHT_EYE_EAR: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// 4-point bounding box of one eye, for the gaze ratio
#[derive(Debug, Clone, Copy)]
pub struct EyeBox {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

/// Left-eye gaze box
pub const LEFT_EYE_BOX: EyeBox = EyeBox {
    left: 33,
    right: 133,
    top: 159,
    bottom: 145,
};

/// Right-eye gaze box
pub const RIGHT_EYE_BOX: EyeBox = EyeBox {
    left: 362,
    right: 263,
    top: 386,
    bottom: 374,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_within_mesh() {
        for idx in [
            NOSE_TIP,
            CHIN,
            FOREHEAD,
            LEFT_EYE_OUTER,
            RIGHT_EYE_OUTER,
            MOUTH_LEFT,
            MOUTH_RIGHT,
        ] {
            assert!(idx < MESH_POINT_COUNT);
        }
        for idx in LEFT_EYE_EAR.iter().chain(RIGHT_EYE_EAR.iter()) {
            assert!(*idx < MESH_POINT_COUNT);
        }
    }

    #[test]
    fn test_iris_indices_within_refined_mesh() {
        assert!(LEFT_IRIS_CENTER >= MESH_POINT_COUNT);
        assert!(LEFT_IRIS_CENTER < POINT_COUNT);
        assert!(RIGHT_IRIS_CENTER < POINT_COUNT);
    }

    #[test]
    fn test_ear_rings_share_corners_with_boxes() {
        assert_eq!(LEFT_EYE_EAR[0], LEFT_EYE_BOX.left);
        assert_eq!(LEFT_EYE_EAR[3], LEFT_EYE_BOX.right);
        assert_eq!(RIGHT_EYE_EAR[0], RIGHT_EYE_BOX.left);
        assert_eq!(RIGHT_EYE_EAR[3], RIGHT_EYE_BOX.right);
    }
}

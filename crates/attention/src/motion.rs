//! Temporal smoothing and motion accumulation
//!
//! Exponentially smooths head pose and nose position across frames, derives
//! a deadzone-filtered instantaneous movement magnitude, and debounces it
//! into a sustained "moving" signal. The debounce is asymmetric: the counter
//! climbs one per over-threshold frame and decays one per calm frame, so
//! brief spikes never latch and the latch releases gradually.

use face_geometry::HeadPose;

use crate::AttentionConfig;

/// Per-frame motion output
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSample {
    /// Smoothed head pose after this frame
    pub smoothed_pose: HeadPose,
    /// Frame-to-frame angular delta (smoothed yaw + pitch)
    pub angle_diff: f32,
    /// Deadzone-filtered positional delta (smoothed nose)
    pub pos_diff: f32,
    /// Combined instantaneous movement (zero while eyes are closed)
    pub total_movement: f32,
    /// Sustained-movement latch state
    pub is_moving: bool,
}

/// Per-session smoothing and movement state
#[derive(Debug, Clone)]
pub struct MotionTracker {
    alpha: f32,
    deadzone: f32,
    scale: f32,
    threshold: f32,
    latch: u32,
    smoothed_pose: Option<HeadPose>,
    smoothed_nose: Option<(f32, f32)>,
    movement_counter: u32,
}

impl MotionTracker {
    /// Create a tracker with no history
    pub fn new(config: &AttentionConfig) -> Self {
        Self {
            alpha: config.smoothing_alpha,
            deadzone: config.movement_deadzone,
            scale: config.movement_scale,
            threshold: config.movement_threshold,
            latch: config.movement_latch,
            smoothed_pose: None,
            smoothed_nose: None,
            movement_counter: 0,
        }
    }

    /// Current smoothed head pose, if any frame has been observed
    pub fn smoothed_pose(&self) -> Option<HeadPose> {
        self.smoothed_pose
    }

    /// Current movement counter value
    pub fn movement_counter(&self) -> u32 {
        self.movement_counter
    }

    /// Smooth the nose position without advancing motion state
    ///
    /// Used during calibration so the filter has continuity once
    /// classification starts.
    pub fn observe_nose(&mut self, nose: (f32, f32)) {
        self.smoothed_nose = Some(self.blend_nose(nose));
    }

    /// Advance all smoothing state for one frame and return the motion sample
    pub fn update(&mut self, raw_pose: HeadPose, nose: (f32, f32), eyes_open: bool) -> MotionSample {
        let previous_pose = self.smoothed_pose;
        let smoothed_pose = match previous_pose {
            Some(prev) => HeadPose {
                yaw: self.blend(raw_pose.yaw, prev.yaw),
                pitch: self.blend(raw_pose.pitch, prev.pitch),
                roll: self.blend(raw_pose.roll, prev.roll),
            },
            None => raw_pose,
        };
        self.smoothed_pose = Some(smoothed_pose);

        let angle_diff = previous_pose
            .map(|prev| (smoothed_pose.yaw - prev.yaw).abs() + (smoothed_pose.pitch - prev.pitch).abs())
            .unwrap_or(0.0);

        let previous_nose = self.smoothed_nose;
        let smoothed_nose = self.blend_nose(nose);
        self.smoothed_nose = Some(smoothed_nose);

        let raw_diff = previous_nose
            .map(|(px, py)| (smoothed_nose.0 - px).abs() + (smoothed_nose.1 - py).abs())
            .unwrap_or(0.0);
        let pos_diff = if raw_diff < self.deadzone {
            0.0
        } else {
            raw_diff * self.scale
        };

        // Closed-eye frames route to sleep detection, never the movement counter
        let total_movement = if eyes_open { angle_diff + pos_diff } else { 0.0 };
        let is_moving = self.register(total_movement);

        MotionSample {
            smoothed_pose,
            angle_diff,
            pos_diff,
            total_movement,
            is_moving,
        }
    }

    fn register(&mut self, total_movement: f32) -> bool {
        if total_movement > self.threshold {
            self.movement_counter += 1;
        } else {
            self.movement_counter = self.movement_counter.saturating_sub(1);
        }
        self.movement_counter > self.latch
    }

    fn blend(&self, raw: f32, prev: f32) -> f32 {
        self.alpha * raw + (1.0 - self.alpha) * prev
    }

    fn blend_nose(&self, nose: (f32, f32)) -> (f32, f32) {
        match self.smoothed_nose {
            Some((px, py)) => (self.blend(nose.0, px), self.blend(nose.1, py)),
            None => nose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> MotionTracker {
        MotionTracker::new(&AttentionConfig::default())
    }

    fn pose(yaw: f32) -> HeadPose {
        HeadPose {
            yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    #[test]
    fn test_first_frame_seeds_filter() {
        let mut t = tracker();
        let sample = t.update(pose(12.0), (100.0, 100.0), true);
        assert_eq!(sample.smoothed_pose.yaw, 12.0);
        assert_eq!(sample.angle_diff, 0.0);
        assert_eq!(sample.pos_diff, 0.0);
        assert!(!sample.is_moving);
    }

    #[test]
    fn test_smoothing_blend() {
        let mut t = tracker();
        t.update(pose(0.0), (0.0, 0.0), true);
        let sample = t.update(pose(10.0), (0.0, 0.0), true);
        // alpha 0.15: 0.15 * 10 + 0.85 * 0
        assert!((sample.smoothed_pose.yaw - 1.5).abs() < 1e-6);
        assert!((sample.angle_diff - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_deadzone_suppresses_small_drift() {
        let mut t = tracker();
        t.update(pose(0.0), (100.0, 100.0), true);
        // Raw jump of 4px smooths to 0.6px, inside the 1.5 deadzone
        let sample = t.update(pose(0.0), (104.0, 100.0), true);
        assert_eq!(sample.pos_diff, 0.0);
    }

    #[test]
    fn test_latch_and_decay_asymmetry() {
        let mut t = tracker();

        // 5 over-threshold frames reach the latch value but do not exceed it
        for _ in 0..5 {
            assert!(!t.register(2.5));
        }
        // 6th latches
        assert!(t.register(2.5));
        assert_eq!(t.movement_counter(), 6);

        // First calm frame drops the latch, full decay takes 6 frames
        assert!(!t.register(0.0));
        for _ in 0..5 {
            t.register(0.0);
        }
        assert_eq!(t.movement_counter(), 0);

        // Counter is floored at zero
        t.register(0.0);
        assert_eq!(t.movement_counter(), 0);
    }

    #[test]
    fn test_closed_eyes_zero_movement() {
        let mut t = tracker();
        t.update(pose(0.0), (0.0, 0.0), true);
        // Large pose and position jump, but eyes closed
        let sample = t.update(pose(80.0), (300.0, 300.0), false);
        assert_eq!(sample.total_movement, 0.0);
        assert!(sample.angle_diff > 0.0);
    }

    #[test]
    fn test_sustained_head_turn_latches() {
        let mut t = tracker();
        let mut yaw = 0.0;
        t.update(pose(yaw), (0.0, 0.0), true);
        let mut latched = false;
        // Ramp the head steadily; smoothed deltas stay over threshold
        for _ in 0..10 {
            yaw += 20.0;
            latched = t.update(pose(yaw), (0.0, 0.0), true).is_moving;
        }
        assert!(latched);
    }
}

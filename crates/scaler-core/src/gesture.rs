//! Two-hand gesture edge detection for continuous resizing.
//!
//! The gesture is active while all four grab/use inputs are held. On the
//! first active tick the normalized hand distance is captured as the
//! baseline; every later tick compares the current distance against that
//! fixed baseline to decide the resize direction. Capturing (instead of
//! moving immediately) is what prevents a size jump at gesture start.

use glam::Vec3;

/// Which controller an input event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// Raw gesture input state plus the per-activation baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureState {
    grab_left: bool,
    use_left: bool,
    grab_right: bool,
    use_right: bool,
    /// Normalized hand distance captured at activation. 0 is the
    /// "not yet captured" sentinel, not a valid distance.
    initial_hand_distance: f32,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host input callback for the grab inputs.
    pub fn input_grab(&mut self, hand: Hand, pressed: bool) {
        match hand {
            Hand::Left => self.grab_left = pressed,
            Hand::Right => self.grab_right = pressed,
        }
    }

    /// Host input callback for the use inputs.
    pub fn input_use(&mut self, hand: Hand, pressed: bool) {
        match hand {
            Hand::Left => self.use_left = pressed,
            Hand::Right => self.use_right = pressed,
        }
    }

    /// True while all four inputs are held simultaneously.
    pub fn is_active(&self) -> bool {
        self.use_left && self.use_right && self.grab_left && self.grab_right
    }

    /// The captured activation baseline, 0 when not captured.
    pub fn initial_hand_distance(&self) -> f32 {
        self.initial_hand_distance
    }

    /// Processes one tick of gesture input.
    ///
    /// Returns the resize direction (-1 shrink, +1 grow) when the gesture
    /// commands a size change this tick. The activation tick itself never
    /// moves size: it only captures the baseline.
    pub fn process(&mut self, left_hand: Vec3, right_hand: Vec3, size_ratio: f32) -> Option<f32> {
        if self.is_active() {
            let current_distance = left_hand.distance(right_hand) / size_ratio;
            if self.initial_hand_distance == 0.0 {
                self.initial_hand_distance = current_distance;
                None
            } else if self.initial_hand_distance > current_distance {
                Some(-1.0)
            } else {
                Some(1.0)
            }
        } else {
            if self.initial_hand_distance != 0.0 {
                self.initial_hand_distance = 0.0;
            }
            None
        }
    }
}

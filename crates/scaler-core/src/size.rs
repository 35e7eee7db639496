//! Authoritative local size integration.
//!
//! Exactly one [`SizeIntegrator`] exists per machine and it owns that
//! machine's `current_size`. Remote input never mutates it; external actors
//! (size menu, persistence restore) enter through
//! [`SizeIntegrator::observe_external_size`], which can overrule them when
//! limits are enforced.

use glam::Vec3;

use crate::config::{ScalerConfig, size_ratio};
use crate::gesture::GestureState;

/// Raw per-frame input handed over by the host loop.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub shrink_key_held: bool,
    pub grow_key_held: bool,
    /// Left hand bone position, world space.
    pub left_hand: Vec3,
    /// Right hand bone position, world space.
    pub right_hand: Vec3,
    /// Elapsed time since the last tick, in seconds.
    pub dt: f64,
}

impl TickInput {
    /// An idle frame: no keys held, hands at rest.
    pub fn idle(dt: f64) -> Self {
        Self {
            shrink_key_held: false,
            grow_key_held: false,
            left_hand: Vec3::ZERO,
            right_hand: Vec3::ZERO,
            dt,
        }
    }
}

/// Integrates keyboard and gesture input into the local authoritative size.
#[derive(Debug, Clone)]
pub struct SizeIntegrator {
    current_size: f32,
    pub gesture: GestureState,
}

impl SizeIntegrator {
    /// Creates an integrator starting at the given size in meters.
    pub fn new(initial_size: f32) -> Self {
        Self {
            current_size: initial_size,
            gesture: GestureState::new(),
        }
    }

    /// The authoritative local size in meters.
    pub fn current_size(&self) -> f32 {
        self.current_size
    }

    /// Current size divided by the reference size. Strictly positive while
    /// limits are enforced.
    pub fn size_ratio(&self) -> f32 {
        size_ratio(self.current_size)
    }

    /// Integrates one tick of raw input. Returns the new size only when the
    /// value actually changed.
    ///
    /// Keyboard input takes priority: while a resize key is held, gesture
    /// processing is skipped entirely for that tick. Both sources scale
    /// their per-frame delta by the current ratio, so absolute resize speed
    /// grows with size.
    pub fn tick(&mut self, config: &ScalerConfig, input: &TickInput) -> Option<f32> {
        let previous_size = self.current_size;

        if input.shrink_key_held {
            self.add_to_size(config, -config.keyboard_scaling_speed, true);
        } else if input.grow_key_held {
            self.add_to_size(config, config.keyboard_scaling_speed, true);
        } else {
            let ratio = self.size_ratio();
            if let Some(direction) =
                self.gesture.process(input.left_hand, input.right_hand, ratio)
            {
                self.add_to_size(config, direction * config.vr_scaling_speed * ratio, false);
            }
        }

        (self.current_size != previous_size).then_some(self.current_size)
    }

    /// Adds an increment to the current size, optionally scaling it by the
    /// current ratio first, clamping when limits are enforced.
    pub fn add_to_size(&mut self, config: &ScalerConfig, mut increment: f32, ratio_scaled: bool) {
        if ratio_scaled {
            increment *= self.size_ratio();
        }
        let mut new_size = self.current_size + increment;
        if config.enforce_limits {
            new_size = config.clamp_height(new_size);
        }
        self.current_size = new_size;
    }

    /// Folds an externally observed size (menu resize, persistence restore,
    /// join) into the integrator.
    ///
    /// Returns the accepted size and whether the external actor must be
    /// rewritten to it: enforcement overrides any external actor, including
    /// the platform's own size menu.
    pub fn observe_external_size(&mut self, config: &ScalerConfig, reported: f32) -> (f32, bool) {
        if config.enforce_limits {
            let clamped = config.clamp_height(reported);
            let out_of_bounds = (clamped - reported).abs() > f32::EPSILON;
            self.current_size = clamped;
            (clamped, out_of_bounds)
        } else {
            self.current_size = reported;
            (reported, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Hand;

    fn activate_gesture(integrator: &mut SizeIntegrator) {
        integrator.gesture.input_grab(Hand::Left, true);
        integrator.gesture.input_grab(Hand::Right, true);
        integrator.gesture.input_use(Hand::Left, true);
        integrator.gesture.input_use(Hand::Right, true);
    }

    fn hands(distance: f32) -> (Vec3, Vec3) {
        (
            Vec3::new(-distance / 2.0, 1.5, 0.0),
            Vec3::new(distance / 2.0, 1.5, 0.0),
        )
    }

    #[test]
    fn test_idle_tick_reports_no_change() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);

        assert_eq!(integrator.tick(&config, &TickInput::idle(1.0 / 60.0)), None);
        assert!((integrator.current_size() - 1.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_grow_key_scales_delta_by_ratio() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(3.6);

        let mut input = TickInput::idle(1.0 / 60.0);
        input.grow_key_held = true;
        let new_size = integrator.tick(&config, &input).unwrap();

        // ratio 2.0 doubles the per-frame keyboard delta.
        assert!((new_size - (3.6 + 0.025 * 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_shrink_key_wins_over_grow_key() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);

        let mut input = TickInput::idle(1.0 / 60.0);
        input.shrink_key_held = true;
        input.grow_key_held = true;
        let new_size = integrator.tick(&config, &input).unwrap();

        assert!(new_size < 1.8);
    }

    #[test]
    fn test_keyboard_skips_gesture_processing() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);
        activate_gesture(&mut integrator);

        let (left, right) = hands(0.5);
        let mut input = TickInput::idle(1.0 / 60.0);
        input.left_hand = left;
        input.right_hand = right;
        input.grow_key_held = true;
        integrator.tick(&config, &input);

        // The gesture never got to capture a baseline.
        assert!((integrator.gesture.initial_hand_distance() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gesture_activation_tick_applies_zero_delta() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);
        activate_gesture(&mut integrator);

        let (left, right) = hands(0.5);
        let mut input = TickInput::idle(1.0 / 60.0);
        input.left_hand = left;
        input.right_hand = right;

        assert_eq!(integrator.tick(&config, &input), None);
        assert!((integrator.gesture.initial_hand_distance() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gesture_resize_follows_hand_motion() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);
        activate_gesture(&mut integrator);

        let mut input = TickInput::idle(1.0 / 60.0);
        let (left, right) = hands(0.5);
        input.left_hand = left;
        input.right_hand = right;
        integrator.tick(&config, &input);

        // Hands apart: grow by vr speed * ratio (ratio is 1 here).
        let (left, right) = hands(0.8);
        input.left_hand = left;
        input.right_hand = right;
        let grown = integrator.tick(&config, &input).unwrap();
        assert!((grown - (1.8 + 0.025)).abs() < 1e-5);

        // Hands closer than the baseline: shrink.
        let (left, right) = hands(0.2);
        input.left_hand = left;
        input.right_hand = right;
        let shrunk = integrator.tick(&config, &input).unwrap();
        assert!(shrunk < grown);
    }

    #[test]
    fn test_add_to_size_clamps_at_bounds() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(0.12);

        integrator.add_to_size(&config, -1.0, false);
        assert!((integrator.current_size() - config.min_height).abs() < f32::EPSILON);

        // Clamping is idempotent.
        integrator.add_to_size(&config, -1.0, false);
        assert!((integrator.current_size() - config.min_height).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_clamp_when_limits_disabled() {
        let config = ScalerConfig {
            enforce_limits: false,
            ..ScalerConfig::default()
        };
        let mut integrator = SizeIntegrator::new(0.12);

        integrator.add_to_size(&config, -1.0, false);
        assert!(integrator.current_size() < config.min_height);
    }

    #[test]
    fn test_external_size_out_of_bounds_is_rewritten() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);

        let (accepted, rewrite) = integrator.observe_external_size(&config, 400.0);
        assert!((accepted - 100.0).abs() < f32::EPSILON);
        assert!(rewrite);
        assert!((integrator.current_size() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_external_size_in_bounds_is_accepted() {
        let config = ScalerConfig::default();
        let mut integrator = SizeIntegrator::new(1.8);

        let (accepted, rewrite) = integrator.observe_external_size(&config, 2.5);
        assert!((accepted - 2.5).abs() < f32::EPSILON);
        assert!(!rewrite);
    }
}

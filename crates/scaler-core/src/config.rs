//! Externally loaded configuration surface.
//!
//! Everything in here is data handed to the core by the world creator: base
//! speeds, voice ranges, policy parameters, size limits, and feature toggles.
//! The core never mutates it after the one-time [`ScalerConfig::sanitize`]
//! pass at startup.

use serde::{Deserialize, Serialize};

use crate::policy::ScalePolicy;

/// Size considered as "base" for all scaling features, in meters.
pub const REFERENCE_SIZE: f32 = 1.8;

/// Persistence key for the participant's size.
pub const PLAYER_SIZE_KEY: &str = "PlayerSize";

/// Persistence key for the participant's gesture/keys toggle.
pub const PLAYER_SIZE_GESTURE_KEY: &str = "SizeGesture";

/// World-level scaler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerConfig {
    // Default movement speeds at the reference size.
    pub base_strafe_speed: f32,
    pub base_jump_impulse: f32,
    pub base_walk_speed: f32,
    pub base_run_speed: f32,
    pub base_gravity_strength: f32,
    /// Multiplies all movement speeds in one place. 1.0 means no boost.
    pub speed_boost: f32,

    // Voice control.
    /// Distance in meters at which voice starts to fall off.
    pub base_voice_distance_near: f32,
    /// Distance in meters up to which voice can be heard.
    pub base_voice_distance_far: f32,
    /// Width of the voice emitter. 0 is a point in space.
    pub base_voice_volumetric_radius: f32,
    /// Cap on the audio multiplier when growing, so very big participants do
    /// not get absurd voice ranges. 1 effectively disables audio scaling up.
    pub max_audio_multiplier: f32,
    /// When enabled, shrinking also shrinks voice and avatar audio ranges.
    pub shrinking_affects_audio: bool,

    // Scaling mode.
    pub scale_policy: ScalePolicy,

    // Scaling input speeds, applied per frame and scaled by the current ratio.
    pub keyboard_scaling_speed: f32,
    pub vr_scaling_speed: f32,

    // Size limits and rules.
    /// Keeps the size inside `[min_height, max_height]`, overriding any
    /// external actor including the platform's own size menu.
    pub enforce_limits: bool,
    /// Whether the platform's built-in size menu stays available.
    pub allow_size_menu: bool,
    /// Default for the gesture-and-keys toggle.
    pub allow_size_gesture_and_keys: bool,
    pub max_height: f32,
    pub min_height: f32,

    // Extra.
    /// Persist size and toggle state across sessions.
    pub use_persistence: bool,
    /// Log every action the scaler takes on size.
    pub extra_logging: bool,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            base_strafe_speed: 2.0,
            base_jump_impulse: 2.0,
            base_walk_speed: 3.0,
            base_run_speed: 4.0,
            base_gravity_strength: 1.0,
            speed_boost: 1.0,
            base_voice_distance_near: 150.0,
            base_voice_distance_far: 350.0,
            base_voice_volumetric_radius: 0.1,
            max_audio_multiplier: 3.0,
            shrinking_affects_audio: false,
            scale_policy: ScalePolicy::default(),
            keyboard_scaling_speed: 0.025,
            vr_scaling_speed: 0.025,
            enforce_limits: true,
            allow_size_menu: true,
            allow_size_gesture_and_keys: true,
            max_height: 100.0,
            min_height: 0.1,
            use_persistence: false,
            extra_logging: false,
        }
    }
}

impl ScalerConfig {
    /// Loads a configuration from JSON, falling back to defaults for any
    /// omitted field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// One-time startup correction of misconfigured bounds. Not fatal and
    /// not a recurring check.
    pub fn sanitize(&mut self) {
        if self.max_height < self.min_height {
            std::mem::swap(&mut self.max_height, &mut self.min_height);
            tracing::warn!(
                "[config] max height was inferior to min height, values have been swapped"
            );
        }
    }

    /// Clamps a height to the configured bounds.
    pub fn clamp_height(&self, height: f32) -> f32 {
        height.clamp(self.min_height, self.max_height)
    }
}

/// Current size divided by [`REFERENCE_SIZE`].
pub fn size_ratio(size: f32) -> f32 {
    size / REFERENCE_SIZE
}

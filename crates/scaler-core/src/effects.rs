//! Derived effect multipliers and their application to the host player state.

use crate::config::{ScalerConfig, size_ratio};
use crate::host::PlayerStateApi;

/// Camera near-clip plane used below the small-height threshold, in meters.
pub const NEAR_CLIP_SMALL: f32 = 0.001;

/// Default camera near-clip plane, in meters.
pub const NEAR_CLIP_DEFAULT: f32 = 0.05;

/// Height below which the near clip is tightened to avoid clipping issues.
pub const SMALL_HEIGHT_THRESHOLD: f32 = 0.4;

/// Multipliers derived from the current size. Recomputed on every size
/// change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectMultipliers {
    /// Applied to strafe/walk/run speed, jump impulse and gravity.
    pub movement_coef: f32,
    /// Applied to voice and avatar audio ranges, already capped by
    /// `max_audio_multiplier`. Not identical to `movement_coef`: the audio
    /// side additionally applies the shrink-exemption at apply time.
    pub audio_coef: f32,
}

impl EffectMultipliers {
    /// Computes the multipliers for the given size under the configured
    /// policy.
    pub fn compute(config: &ScalerConfig, size: f32) -> Self {
        let factor = config.scale_policy.evaluate(size_ratio(size));
        Self {
            movement_coef: factor * config.speed_boost,
            audio_coef: factor.min(config.max_audio_multiplier),
        }
    }
}

/// Scales an audio distance by the given coefficient.
///
/// Shrunk participants keep their base ranges unless the world explicitly
/// opts in: reducing a voice range below the platform's usable floor makes
/// small participants inaudible. A deliberate asymmetry, not a bug.
pub fn scale_audio_distance(config: &ScalerConfig, base_distance: f32, coef: f32) -> f32 {
    if config.shrinking_affects_audio || coef > 1.0 {
        base_distance * coef
    } else {
        base_distance
    }
}

/// Applies the movement multiplier to every configured base speed.
pub fn apply_movement<P: PlayerStateApi>(config: &ScalerConfig, player: &mut P, coef: f32) {
    player.set_strafe_speed(config.base_strafe_speed * coef);
    player.set_walk_speed(config.base_walk_speed * coef);
    player.set_run_speed(config.base_run_speed * coef);
    player.set_jump_impulse(config.base_jump_impulse * coef);
    player.set_gravity_strength(config.base_gravity_strength * coef);
}

/// Applies an audio multiplier to a participant's voice and avatar audio
/// ranges, evaluated against this machine's own base values.
///
/// The coefficient is clamped here as well, so a remote sender with a
/// different or stale clamp configuration cannot push past the local cap.
pub fn apply_audio<P: PlayerStateApi>(config: &ScalerConfig, player: &mut P, audio_coef: f32) {
    let coef = audio_coef.min(config.max_audio_multiplier);

    player.set_voice_distance_near(scale_audio_distance(
        config,
        config.base_voice_distance_near,
        coef,
    ));

    let far = scale_audio_distance(config, config.base_voice_distance_far, coef);
    player.set_voice_distance_far(far);
    player.set_avatar_audio_far_radius(far);

    let volumetric = scale_audio_distance(config, config.base_voice_volumetric_radius, coef);
    player.set_voice_volumetric_radius(volumetric);
    player.set_avatar_audio_volumetric_radius(volumetric);
}

/// Camera near-clip plane for the given height.
pub fn near_clip_for_height(height: f32) -> f32 {
    if height < SMALL_HEIGHT_THRESHOLD {
        NEAR_CLIP_SMALL
    } else {
        NEAR_CLIP_DEFAULT
    }
}

//! Host collaborator traits.
//!
//! The core never talks to a concrete platform. Movement, voice and camera
//! writes go through [`PlayerStateApi`]; the float/bool store behind session
//! persistence goes through [`PersistenceStore`]. Hosts implement these over
//! whatever player-state API and key-value store they actually have.

/// Write access to one participant's rendered state on this machine.
///
/// For the local participant this is the full surface; for remote
/// participants only the audio setters and eye height are ever touched.
pub trait PlayerStateApi {
    fn set_strafe_speed(&mut self, value: f32);
    fn set_walk_speed(&mut self, value: f32);
    fn set_run_speed(&mut self, value: f32);
    fn set_jump_impulse(&mut self, value: f32);
    fn set_gravity_strength(&mut self, value: f32);

    fn set_voice_distance_near(&mut self, value: f32);
    fn set_voice_distance_far(&mut self, value: f32);
    fn set_voice_volumetric_radius(&mut self, value: f32);
    fn set_avatar_audio_far_radius(&mut self, value: f32);
    fn set_avatar_audio_volumetric_radius(&mut self, value: f32);

    fn avatar_eye_height(&self) -> f32;
    fn set_avatar_eye_height(&mut self, meters: f32);
    fn set_avatar_eye_height_minimum(&mut self, meters: f32);
    fn set_avatar_eye_height_maximum(&mut self, meters: f32);
    /// Whether the platform's own size menu stays usable.
    fn set_manual_scaling_allowed(&mut self, allowed: bool);

    fn set_camera_near_clip(&mut self, value: f32);
}

/// Key-value persistence for the size and gesture-toggle state.
pub trait PersistenceStore {
    fn get_float(&self, key: &str) -> Option<f32>;
    fn set_float(&mut self, key: &str, value: f32);
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&mut self, key: &str, value: bool);
}

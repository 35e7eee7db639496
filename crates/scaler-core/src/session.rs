//! Session façade exposing the host-triggered entry points.
//!
//! One [`ScaleSession`] per machine, owning that machine's authoritative
//! size, derived multipliers, and broadcast cadence. Host callbacks map to
//! named operations: the per-frame [`ScaleSession::tick`], the lifecycle
//! callbacks (`on_player_joined`, `on_player_restored`), the external size
//! observation (`on_eye_height_changed`), and the inbound remote apply path
//! (`on_remote_message`).
//!
//! All locally-owned state is touched only from the tick callback, so no
//! locking is needed; the remote apply path is stateless per call and safe
//! to invoke at arbitrary times relative to the local tick.

use crate::PlayerId;
use crate::config::{PLAYER_SIZE_GESTURE_KEY, PLAYER_SIZE_KEY, REFERENCE_SIZE, ScalerConfig};
use crate::effects::{self, EffectMultipliers};
use crate::gesture::Hand;
use crate::host::{PersistenceStore, PlayerStateApi};
use crate::size::{SizeIntegrator, TickInput};
use crate::sync::{AudioScaleMessage, SyncThrottle};

/// Per-machine scaling session.
#[derive(Debug, Clone)]
pub struct ScaleSession {
    local_id: PlayerId,
    config: ScalerConfig,
    integrator: SizeIntegrator,
    throttle: SyncThrottle,
    /// Last audio multiplier computed for the local participant; the payload
    /// of the next flush.
    audio_coef: f32,
    /// Runtime state of the gesture/keys toggle. Starts from the configured
    /// default and is the single source of truth the UI projects from.
    allow_size_gesture_and_keys: bool,
}

impl ScaleSession {
    /// Creates a session for the local participant, sanitizing the
    /// configuration once.
    pub fn new(local_id: PlayerId, mut config: ScalerConfig) -> Self {
        config.sanitize();
        let allow_size_gesture_and_keys = config.allow_size_gesture_and_keys;
        Self {
            local_id,
            integrator: SizeIntegrator::new(REFERENCE_SIZE),
            throttle: SyncThrottle::new(),
            audio_coef: 1.0,
            allow_size_gesture_and_keys,
            config,
        }
    }

    pub fn local_id(&self) -> PlayerId {
        self.local_id
    }

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    /// The authoritative local size in meters.
    pub fn current_size(&self) -> f32 {
        self.integrator.current_size()
    }

    /// Last audio multiplier computed for the local participant.
    pub fn audio_coef(&self) -> f32 {
        self.audio_coef
    }

    /// One-way projection of the gesture/keys toggle for UI display.
    pub fn gesture_toggle_state(&self) -> bool {
        self.allow_size_gesture_and_keys
    }

    /// Host input callback for the controller grab inputs.
    pub fn input_grab(&mut self, hand: Hand, pressed: bool) {
        self.integrator.gesture.input_grab(hand, pressed);
    }

    /// Host input callback for the controller use inputs.
    pub fn input_use(&mut self, hand: Hand, pressed: bool) {
        self.integrator.gesture.input_use(hand, pressed);
    }

    /// One simulation tick.
    ///
    /// Integrates raw input into the local size, applies the derived effects
    /// on a change, and advances the broadcast throttle. Returns the
    /// coalesced outbound message when the batching window flushes; the host
    /// delivers it to all other participants.
    pub fn tick<P: PlayerStateApi>(
        &mut self,
        input: &TickInput,
        player: &mut P,
    ) -> Option<AudioScaleMessage> {
        if self.allow_size_gesture_and_keys {
            if let Some(new_size) = self.integrator.tick(&self.config, input) {
                player.set_avatar_eye_height(new_size);
                self.apply_local_scaling(new_size, player);
            }
        }

        // The throttle runs every frame regardless of the toggle, so a
        // pending menu-driven change still flushes.
        self.throttle.tick(input.dt).then(|| AudioScaleMessage {
            sender_id: self.local_id,
            audio_coef: self.audio_coef,
        })
    }

    /// Host callback: a size limit rule set must be established for the
    /// local participant on join.
    pub fn on_player_joined<P: PlayerStateApi>(&mut self, player: &mut P) {
        if self.config.enforce_limits {
            player.set_avatar_eye_height_maximum(self.config.max_height);
            player.set_avatar_eye_height_minimum(self.config.min_height);
        }
        player.set_manual_scaling_allowed(self.config.allow_size_menu);

        tracing::info!(
            "[session] player {}: size menu {}, gesture {}, bounds [{}, {}]m",
            self.local_id,
            if self.config.allow_size_menu { "allowed" } else { "unallowed" },
            if self.allow_size_gesture_and_keys { "allowed" } else { "unallowed" },
            self.config.min_height,
            self.config.max_height,
        );
    }

    /// Host callback: persisted state became available for the local
    /// participant.
    ///
    /// Restores the previous size and gesture toggle when persistence is
    /// enabled; otherwise re-applies the current size so scaling takes
    /// effect on join. The UI should re-project
    /// [`ScaleSession::gesture_toggle_state`] afterwards.
    pub fn on_player_restored<P: PlayerStateApi, S: PersistenceStore>(
        &mut self,
        player: &mut P,
        store: &S,
    ) {
        if self.config.use_persistence {
            if let Some(previous_size) = store.get_float(PLAYER_SIZE_KEY) {
                if previous_size > 0.0 {
                    player.set_avatar_eye_height(previous_size);
                }
            }
            if let Some(enabled) = store.get_bool(PLAYER_SIZE_GESTURE_KEY) {
                self.allow_size_gesture_and_keys = enabled;
            }
        } else {
            player.set_avatar_eye_height(player.avatar_eye_height());
        }
    }

    /// Host callback: the local avatar's eye height changed (size menu,
    /// persistence restore, or a write of our own).
    ///
    /// Clamps and, when the observed size escaped the bounds, forcibly
    /// rewrites the external actor. Then adjusts the camera near-clip,
    /// applies the derived effects, and persists the accepted size.
    pub fn on_eye_height_changed<P: PlayerStateApi, S: PersistenceStore>(
        &mut self,
        previous_height: f32,
        player: &mut P,
        store: &mut S,
    ) {
        let reported = player.avatar_eye_height();
        let (accepted, rewrite) = self.integrator.observe_external_size(&self.config, reported);

        if rewrite {
            if self.config.extra_logging {
                tracing::info!(
                    "[session] player {} went from {previous_height}m to {reported}m, enforcing height limit to {accepted}m",
                    self.local_id,
                );
            }
            player.set_avatar_eye_height(accepted);
        }

        self.apply_local_scaling(accepted, player);

        if self.config.use_persistence {
            store.set_float(PLAYER_SIZE_KEY, accepted);
        }
    }

    /// Inbound remote apply path.
    ///
    /// Resolves the sender to a live participant on this machine and applies
    /// the broadcast multiplier to that participant's audio parameters,
    /// evaluated against this machine's own base values and shrink rule. An
    /// unknown sender is discarded silently: the peer may have left before
    /// the message arrived. Idempotent, and safe to call at any time
    /// relative to the local tick.
    pub fn on_remote_message<'a, P, F>(&self, message: &AudioScaleMessage, resolve: F)
    where
        P: PlayerStateApi + 'a,
        F: FnOnce(PlayerId) -> Option<&'a mut P>,
    {
        let Some(player) = resolve(message.sender_id) else {
            return;
        };

        effects::apply_audio(&self.config, player, message.audio_coef);

        if self.config.extra_logging {
            tracing::info!(
                "[session] applied audio scaling from player {}: coef {}",
                message.sender_id,
                message.audio_coef.min(self.config.max_audio_multiplier),
            );
        }
    }

    /// UI ingestion: flips the gesture/keys toggle and persists the new
    /// state. Returns the state after the flip.
    pub fn toggle_scaling_gesture<S: PersistenceStore>(&mut self, store: &mut S) -> bool {
        self.allow_size_gesture_and_keys = !self.allow_size_gesture_and_keys;
        if self.config.use_persistence {
            store.set_bool(PLAYER_SIZE_GESTURE_KEY, self.allow_size_gesture_and_keys);
        }
        self.allow_size_gesture_and_keys
    }

    /// Local apply path: recompute the multipliers for the new size, push
    /// them to the host player state, and arm the broadcast throttle.
    fn apply_local_scaling<P: PlayerStateApi>(&mut self, size: f32, player: &mut P) {
        let multipliers = EffectMultipliers::compute(&self.config, size);

        player.set_camera_near_clip(effects::near_clip_for_height(size));
        effects::apply_movement(&self.config, player, multipliers.movement_coef);
        effects::apply_audio(&self.config, player, multipliers.audio_coef);

        self.audio_coef = multipliers.audio_coef;
        self.throttle.arm();

        if self.config.extra_logging {
            tracing::info!(
                "[session] player {} size {size}m, movement coef {}, audio coef {}",
                self.local_id,
                multipliers.movement_coef,
                multipliers.audio_coef,
            );
        }
    }
}

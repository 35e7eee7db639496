//! Scaler Core Library
//!
//! Derives a participant's movement, gravity, and voice parameters from a
//! single scalar (body height) and keeps the derived state consistent across
//! a distributed simulation in which each participant's height is
//! authoritative only on its own machine.
//!
//! The library is host-agnostic: movement and audio writes go through the
//! [`host::PlayerStateApi`] trait, persistence through
//! [`host::PersistenceStore`], and network transport stays entirely outside —
//! the core only decides *when* to emit a sync message and with what payload.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod curve;
pub mod effects;
pub mod gesture;
pub mod host;
pub mod policy;
pub mod session;
pub mod size;
pub mod sync;

pub use config::{PLAYER_SIZE_GESTURE_KEY, PLAYER_SIZE_KEY, REFERENCE_SIZE, ScalerConfig};
pub use curve::{CurveError, CurveKey, ScalingCurve};
pub use effects::EffectMultipliers;
pub use gesture::{GestureState, Hand};
pub use host::{PersistenceStore, PlayerStateApi};
pub use policy::ScalePolicy;
pub use session::ScaleSession;
pub use size::{SizeIntegrator, TickInput};
pub use sync::{AudioScaleMessage, NETWORK_SYNC_INTERVAL_SEC, SyncThrottle};

/// Unique identifier for a participant.
pub type PlayerId = u32;

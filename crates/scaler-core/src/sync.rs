//! Rate-limited replication of the derived audio multiplier.
//!
//! Resizing can easily produce a size change every frame; broadcasting each
//! one would flood the event budget. The throttle coalesces bursts of local
//! changes into at most one outbound message per interval, always carrying
//! the latest value, and guarantees the final value is eventually sent.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Time to wait before the next sync event can be sent, in seconds.
pub const NETWORK_SYNC_INTERVAL_SEC: f64 = 0.5;

/// Outbound broadcast cadence for one local participant.
///
/// Two states: idle (`pending_flush == false`) and armed. Arming while the
/// previous window has fully elapsed reseeds the cooldown, so a flush never
/// fires on the same tick it was armed.
#[derive(Debug, Clone, Default)]
pub struct SyncThrottle {
    pending_flush: bool,
    cooldown_remaining: f64,
}

impl SyncThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the throttle after a local change.
    pub fn arm(&mut self) {
        self.pending_flush = true;

        // Ensures at least one full interval between flushes.
        if self.cooldown_remaining <= f64::EPSILON {
            self.cooldown_remaining = NETWORK_SYNC_INTERVAL_SEC;
        }
    }

    /// Advances the throttle by one tick.
    ///
    /// Returns true exactly once per armed window, when the batching window
    /// has elapsed. While the window is open the call only decrements the
    /// cooldown; changes arming the throttle in the meantime coalesce.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.cooldown_remaining > f64::EPSILON {
            self.cooldown_remaining -= dt;
            false
        } else if self.pending_flush {
            self.pending_flush = false;
            true
        } else {
            false
        }
    }

    /// True while a flush is pending.
    pub fn is_armed(&self) -> bool {
        self.pending_flush
    }
}

/// Coalesced one-to-many update carrying the sender's derived audio
/// multiplier. Fire-and-forget: no acknowledgement, no ordering guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioScaleMessage {
    pub sender_id: PlayerId,
    pub audio_coef: f32,
}

impl AudioScaleMessage {
    /// Serialize the message to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, String> {
        postcard::to_allocvec(self).map_err(|e| e.to_string())
    }

    /// Deserialize a message from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        postcard::from_bytes(data).map_err(|e| e.to_string())
    }
}

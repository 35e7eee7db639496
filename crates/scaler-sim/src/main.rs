//! Scaler Simulation Harness
//!
//! Drives N simulated participants through a deterministic tick loop over an
//! in-memory message bus. Each participant grows for a scripted stretch of
//! the run; every machine renders its own view of all participants, so the
//! log at the end shows the replicated audio state converging.

use std::collections::HashMap;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scaler_core::{
    AudioScaleMessage, PersistenceStore, PlayerId, PlayerStateApi, ScaleSession, ScalerConfig,
    TickInput,
};

const DT: f64 = 1.0 / 60.0;

#[derive(Debug, Parser)]
#[command(about = "Headless multi-participant scaling simulation")]
struct Args {
    /// Number of simulated participants.
    #[arg(long, default_value_t = 3)]
    participants: u32,

    /// Number of simulation ticks to run (60 per second).
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// Ticks each participant holds the grow key, staggered per participant.
    #[arg(long, default_value_t = 90)]
    grow_ticks: u64,
}

/// Rendered state of one participant as seen by one machine.
#[derive(Debug, Default, Clone)]
struct SimPlayer {
    walk_speed: f32,
    run_speed: f32,
    gravity: f32,
    voice_far: f32,
    voice_near: f32,
    eye_height: f32,
    near_clip: f32,
}

impl PlayerStateApi for SimPlayer {
    fn set_strafe_speed(&mut self, _value: f32) {}
    fn set_walk_speed(&mut self, value: f32) {
        self.walk_speed = value;
    }
    fn set_run_speed(&mut self, value: f32) {
        self.run_speed = value;
    }
    fn set_jump_impulse(&mut self, _value: f32) {}
    fn set_gravity_strength(&mut self, value: f32) {
        self.gravity = value;
    }
    fn set_voice_distance_near(&mut self, value: f32) {
        self.voice_near = value;
    }
    fn set_voice_distance_far(&mut self, value: f32) {
        self.voice_far = value;
    }
    fn set_voice_volumetric_radius(&mut self, _value: f32) {}
    fn set_avatar_audio_far_radius(&mut self, _value: f32) {}
    fn set_avatar_audio_volumetric_radius(&mut self, _value: f32) {}
    fn avatar_eye_height(&self) -> f32 {
        self.eye_height
    }
    fn set_avatar_eye_height(&mut self, meters: f32) {
        self.eye_height = meters;
    }
    fn set_avatar_eye_height_minimum(&mut self, _meters: f32) {}
    fn set_avatar_eye_height_maximum(&mut self, _meters: f32) {}
    fn set_manual_scaling_allowed(&mut self, _allowed: bool) {}
    fn set_camera_near_clip(&mut self, value: f32) {
        self.near_clip = value;
    }
}

/// In-memory float/bool store standing in for the platform's persistence.
#[derive(Debug, Default)]
struct SimStore {
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
}

impl PersistenceStore for SimStore {
    fn get_float(&self, key: &str) -> Option<f32> {
        self.floats.get(key).copied()
    }
    fn set_float(&mut self, key: &str, value: f32) {
        self.floats.insert(key.to_string(), value);
    }
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }
    fn set_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }
}

/// One participant's machine: session, persistence, and its local view of
/// every participant in the instance.
struct Machine {
    session: ScaleSession,
    store: SimStore,
    views: HashMap<PlayerId, SimPlayer>,
}

impl Machine {
    fn new(id: PlayerId, participant_ids: &[PlayerId]) -> Self {
        let mut views = HashMap::new();
        for &pid in participant_ids {
            views.insert(pid, SimPlayer::default());
        }

        let mut machine = Self {
            session: ScaleSession::new(id, ScalerConfig::default()),
            store: SimStore::default(),
            views,
        };
        let local = machine
            .views
            .get_mut(&id)
            .expect("local view was just inserted");
        machine.session.on_player_joined(local);
        machine.session.on_player_restored(local, &machine.store);
        machine
    }

    fn tick(&mut self, input: &TickInput) -> Option<AudioScaleMessage> {
        let id = self.session.local_id();
        let local = self.views.get_mut(&id).expect("local view exists");
        self.session.tick(input, local)
    }

    fn receive(&mut self, message: &AudioScaleMessage) {
        self.session
            .on_remote_message(message, |id| self.views.get_mut(&id));
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let ids: Vec<PlayerId> = (1..=args.participants).collect();

    tracing::info!(
        "[sim] starting with {} participants for {} ticks",
        args.participants,
        args.ticks
    );

    let mut machines: Vec<Machine> = ids.iter().map(|&id| Machine::new(id, &ids)).collect();

    for tick in 0..args.ticks {
        // Stagger each participant's grow stretch so the broadcasts overlap.
        let mut outbound = Vec::new();
        for (index, machine) in machines.iter_mut().enumerate() {
            let start = index as u64 * args.grow_ticks;
            let mut input = TickInput::idle(DT);
            input.grow_key_held = tick >= start && tick < start + args.grow_ticks;

            if let Some(message) = machine.tick(&input) {
                tracing::info!(
                    "[sim] tick {tick}: participant {} broadcast coef {:.4}",
                    message.sender_id,
                    message.audio_coef
                );
                outbound.push(message);
            }
        }

        // Fire-and-forget delivery to every other machine.
        for message in &outbound {
            for machine in &mut machines {
                if machine.session.local_id() != message.sender_id {
                    machine.receive(message);
                }
            }
        }
    }

    for machine in &machines {
        let id = machine.session.local_id();
        tracing::info!(
            "[sim] participant {id}: size {:.3}m, walk {:.3}, gravity {:.3}",
            machine.session.current_size(),
            machine.views[&id].walk_speed,
            machine.views[&id].gravity
        );
        for &other in &ids {
            if other != id {
                tracing::info!(
                    "[sim]   view of {other}: voice far {:.1}m, near {:.1}m",
                    machine.views[&other].voice_far,
                    machine.views[&other].voice_near
                );
            }
        }
    }
}

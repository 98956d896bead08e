//! Procedural UI sound: ambient drone plus hover/click/transition cues.
//!
//! The engine starts out `Uninitialized` and only opens its audio graph on
//! [`ToneEngine::activate`], which the page calls from a user gesture. If the
//! graph cannot be opened the engine turns `Inert` for good and every call is
//! a silent no-op. Playback while muted or before activation is likewise a
//! no-op rather than an error.

use crate::backend::AudioBackend;
use crate::clock::{RateLimiter, WallClock};
use crate::constants::*;
use crate::envelope::fade;
use crate::error::AudioError;
use crate::prefs::PreferenceStore;
use crate::tone::{Bus, ToneEvent};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ToneConfig {
    pub ambient_volume: f32,
    pub effects_volume: f32,
    pub hover_interval: Duration,
    pub drone_fade_sec: f64,
    pub mute_fade_sec: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            ambient_volume: AMBIENT_VOLUME,
            effects_volume: EFFECTS_VOLUME,
            hover_interval: Duration::from_millis(HOVER_MIN_INTERVAL_MS),
            drone_fade_sec: DRONE_FADE_SEC,
            mute_fade_sec: MUTE_FADE_SEC,
        }
    }
}

type Opener<B> = Box<dyn FnOnce() -> Result<B, AudioError>>;

enum Drone<G> {
    Idle,
    Playing(SmallVec<[G; 4]>),
    /// Fading out; every generator already has its stop scheduled at `halt_at`.
    Stopping {
        generators: SmallVec<[G; 4]>,
        halt_at: f64,
    },
}

struct ActiveGraph<B: AudioBackend> {
    backend: B,
    ambient: B::Bus,
    effects: B::Bus,
    drone: Drone<B::Generator>,
}

impl<B: AudioBackend> ActiveGraph<B> {
    fn open(mut backend: B, config: &ToneConfig, muted: bool) -> Result<Self, AudioError> {
        let level = |volume: f32| if muted { 0.0 } else { volume };
        let ambient = backend.create_bus(level(config.ambient_volume))?;
        let effects = backend.create_bus(level(config.effects_volume))?;
        Ok(Self {
            backend,
            ambient,
            effects,
            drone: Drone::Idle,
        })
    }

    fn drone_playing(&self) -> bool {
        match &self.drone {
            Drone::Idle => false,
            Drone::Playing(_) => true,
            Drone::Stopping { halt_at, .. } => self.backend.current_time() < *halt_at,
        }
    }

    /// Drop handles of a drone whose fade-out has finished.
    fn reap(&mut self) {
        if let Drone::Stopping {
            generators,
            halt_at,
        } = &self.drone
        {
            if self.backend.current_time() >= *halt_at {
                log::debug!("[tone] released {} drone generators", generators.len());
                self.drone = Drone::Idle;
            }
        }
    }

    fn fade_bus(&mut self, bus: Bus, target: f32, duration: f64) {
        let handle = match bus {
            Bus::Ambient => &self.ambient,
            Bus::Effects => &self.effects,
        };
        let now = self.backend.current_time();
        let current = self.backend.bus_gain(handle);
        if let Err(e) = self
            .backend
            .automate_bus(handle, &fade(current, target, now, duration))
        {
            log::error!("[tone] {:?} bus fade failed: {}", bus, e);
        }
    }

    /// Schedule every voice of a one-shot event. Returns how many started.
    fn emit(&mut self, event: &ToneEvent) -> usize {
        let bus = match event.bus {
            Bus::Ambient => &self.ambient,
            Bus::Effects => &self.effects,
        };
        let now = self.backend.current_time();
        let mut started = 0;
        for voice in event.schedule(now) {
            match self.backend.start_voice(&voice, bus) {
                Ok(_) => started += 1,
                Err(e) => log::error!("[tone] {:?} voice skipped: {}", event.kind, e),
            }
        }
        started
    }

    fn start_drone(&mut self, config: &ToneConfig) -> bool {
        let event = ToneEvent::ambient_drone();
        let now = self.backend.current_time();
        let mut generators: SmallVec<[B::Generator; 4]> = SmallVec::new();
        for voice in event.schedule(now) {
            match self.backend.start_voice(&voice, &self.ambient) {
                Ok(g) => generators.push(g),
                Err(e) => {
                    log::error!("[tone] drone layer failed: {}", e);
                    for g in &generators {
                        self.backend.stop(g, now);
                    }
                    return false;
                }
            }
        }
        if let Some(modulator) = event.modulator {
            let lfo = generators
                .get(modulator.target)
                .map(|target| self.backend.start_modulator(&modulator, target, now));
            match lfo {
                Some(Ok(g)) => generators.push(g),
                Some(Err(e)) => log::error!("[tone] drone modulator failed: {}", e),
                None => {}
            }
        }
        let fade_in = fade(0.0, config.ambient_volume, now, config.drone_fade_sec);
        if let Err(e) = self.backend.automate_bus(&self.ambient, &fade_in) {
            log::error!("[tone] ambient fade-in failed: {}", e);
        }
        self.drone = Drone::Playing(generators);
        true
    }

    fn stop_drone(&mut self, config: &ToneConfig) -> bool {
        let generators = match std::mem::replace(&mut self.drone, Drone::Idle) {
            Drone::Playing(generators) => generators,
            other => {
                self.drone = other;
                return false;
            }
        };
        self.fade_bus(Bus::Ambient, 0.0, config.drone_fade_sec);
        let halt_at = self.backend.current_time() + config.drone_fade_sec;
        for g in &generators {
            self.backend.stop(g, halt_at);
        }
        self.drone = Drone::Stopping {
            generators,
            halt_at,
        };
        true
    }
}

enum EngineState<B: AudioBackend> {
    Uninitialized,
    Active(ActiveGraph<B>),
    Inert,
}

pub struct ToneEngine<B: AudioBackend> {
    config: ToneConfig,
    state: EngineState<B>,
    opener: Option<Opener<B>>,
    store: Box<dyn PreferenceStore>,
    hover_gate: RateLimiter,
    muted: bool,
}

impl<B: AudioBackend> ToneEngine<B> {
    /// `opener` builds the audio graph on first activation; the muted flag is
    /// read from `store` right away.
    pub fn new(
        config: ToneConfig,
        opener: impl FnOnce() -> Result<B, AudioError> + 'static,
        clock: impl WallClock + 'static,
        store: impl PreferenceStore + 'static,
    ) -> Self {
        let muted = store.load_muted();
        let hover_gate = RateLimiter::new(Box::new(clock), config.hover_interval);
        Self {
            config,
            state: EngineState::Uninitialized,
            opener: Some(Box::new(opener)),
            store: Box::new(store),
            hover_gate,
            muted,
        }
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EngineState::Active(_))
    }

    pub fn is_inert(&self) -> bool {
        matches!(self.state, EngineState::Inert)
    }

    /// True from drone start until its fade-out has completed.
    pub fn is_ambient_playing(&self) -> bool {
        match &self.state {
            EngineState::Active(graph) => graph.drone_playing(),
            _ => false,
        }
    }

    pub fn backend(&self) -> Option<&B> {
        match &self.state {
            EngineState::Active(graph) => Some(&graph.backend),
            _ => None,
        }
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        match &mut self.state {
            EngineState::Active(graph) => Some(&mut graph.backend),
            _ => None,
        }
    }

    pub fn bus(&self, bus: Bus) -> Option<&B::Bus> {
        match &self.state {
            EngineState::Active(graph) => Some(match bus {
                Bus::Ambient => &graph.ambient,
                Bus::Effects => &graph.effects,
            }),
            _ => None,
        }
    }

    /// Open the audio graph. Only the first call does anything.
    pub fn activate(&mut self) {
        if !matches!(self.state, EngineState::Uninitialized) {
            return;
        }
        let Some(open) = self.opener.take() else {
            self.state = EngineState::Inert;
            return;
        };
        self.state = match open().and_then(|b| ActiveGraph::open(b, &self.config, self.muted)) {
            Ok(graph) => {
                log::info!("[tone] audio graph ready (muted={})", self.muted);
                EngineState::Active(graph)
            }
            Err(e) => {
                log::warn!("[tone] audio unavailable, staying silent: {}", e);
                EngineState::Inert
            }
        };
    }

    pub fn start_ambient_drone(&mut self) {
        if self.muted {
            return;
        }
        if let EngineState::Active(graph) = &mut self.state {
            graph.reap();
            if graph.drone_playing() {
                return;
            }
            if graph.start_drone(&self.config) {
                log::info!("[tone] ambient drone started");
            }
        }
    }

    pub fn stop_ambient_drone(&mut self) {
        if let EngineState::Active(graph) = &mut self.state {
            graph.reap();
            if graph.stop_drone(&self.config) {
                log::info!("[tone] ambient drone fading out");
            }
        }
    }

    pub fn play_hover(&mut self) {
        if !self.hover_gate.try_acquire() {
            return;
        }
        self.emit(&ToneEvent::hover());
    }

    pub fn play_click(&mut self) {
        self.emit(&ToneEvent::click());
    }

    pub fn play_transition(&mut self) {
        self.emit(&ToneEvent::transition());
    }

    /// Flip and persist the mute flag, fading both buses. Unmuting brings the
    /// drone back if it is not already playing. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.store.save_muted(self.muted);
        let muted = self.muted;

        let mut restart_drone = false;
        if let EngineState::Active(graph) = &mut self.state {
            graph.reap();
            let (ambient, effects) = if muted {
                (0.0, 0.0)
            } else {
                (self.config.ambient_volume, self.config.effects_volume)
            };
            graph.fade_bus(Bus::Ambient, ambient, self.config.mute_fade_sec);
            graph.fade_bus(Bus::Effects, effects, self.config.mute_fade_sec);
            restart_drone = !muted && !graph.drone_playing();
        }
        if restart_drone {
            self.start_ambient_drone();
        }

        if muted {
            log::info!("[tone] muted");
        } else {
            log::info!("[tone] unmuted");
        }
        muted
    }

    fn emit(&mut self, event: &ToneEvent) {
        if self.muted {
            return;
        }
        if let EngineState::Active(graph) = &mut self.state {
            graph.emit(event);
        }
    }
}

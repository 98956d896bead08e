//! Headless audio graph.
//!
//! Records buses, voices and their automation against a clock that only moves
//! when told to, and evaluates parameter curves the way WebAudio would. Tests
//! drive the engine through this instead of a browser.

use crate::backend::AudioBackend;
use crate::envelope::{evaluate, Automation};
use crate::error::AudioError;
use crate::tone::{Modulator, ScheduledVoice, Waveform};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BusId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorId(u32);

#[derive(Clone, Debug)]
struct BusRecord {
    initial: f32,
    automation: Vec<Automation>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Routing {
    Bus(BusId),
    /// Added to another generator's frequency, scaled by `depth_hz`.
    Frequency { target: GeneratorId, depth_hz: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorRecord {
    pub waveform: Waveform,
    pub routing: Routing,
    pub frequency: Vec<Automation>,
    pub gain: Vec<Automation>,
    pub start: f64,
    pub stop: Option<f64>,
}

impl GeneratorRecord {
    pub fn is_running_at(&self, t: f64) -> bool {
        self.start <= t && self.stop.map_or(true, |s| t < s)
    }

    pub fn frequency_at(&self, t: f64) -> f32 {
        evaluate(0.0, &self.frequency, t)
    }

    pub fn gain_at(&self, t: f64) -> f32 {
        evaluate(1.0, &self.gain, t)
    }
}

#[derive(Default)]
pub struct OfflineGraph {
    now: f64,
    buses: Vec<BusRecord>,
    generators: FnvHashMap<GeneratorId, GeneratorRecord>,
    next_id: u32,
}

impl OfflineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&mut self, t: f64) {
        debug_assert!(t >= self.now, "audio clock must not run backwards");
        self.now = t;
    }

    pub fn advance(&mut self, dt: f64) {
        self.now += dt.max(0.0);
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn bus_value_at(&self, bus: BusId, t: f64) -> f32 {
        self.buses
            .get(bus.0)
            .map(|b| evaluate(b.initial, &b.automation, t))
            .unwrap_or(0.0)
    }

    pub fn bus_automation(&self, bus: BusId) -> &[Automation] {
        self.buses
            .get(bus.0)
            .map(|b| b.automation.as_slice())
            .unwrap_or(&[])
    }

    pub fn generator(&self, id: GeneratorId) -> Option<&GeneratorRecord> {
        self.generators.get(&id)
    }

    /// Every generator still held, ordered by creation.
    pub fn generators(&self) -> Vec<(GeneratorId, &GeneratorRecord)> {
        let mut all: Vec<_> = self.generators.iter().map(|(id, g)| (*id, g)).collect();
        all.sort_by_key(|(id, _)| id.0);
        all
    }

    pub fn running_generators(&self) -> usize {
        self.generators
            .values()
            .filter(|g| g.is_running_at(self.now))
            .count()
    }

    /// Voices routed to `bus`, including ones that have finished.
    pub fn voices_on(&self, bus: BusId) -> Vec<&GeneratorRecord> {
        self.generators()
            .into_iter()
            .map(|(_, g)| g)
            .filter(|g| g.routing == Routing::Bus(bus))
            .collect()
    }

    /// Forget generators whose stop time has passed.
    pub fn prune(&mut self) -> usize {
        let now = self.now;
        let before = self.generators.len();
        self.generators.retain(|_, g| g.stop.map_or(true, |s| s > now));
        before - self.generators.len()
    }

    fn insert(&mut self, record: GeneratorRecord) -> GeneratorId {
        let id = GeneratorId(self.next_id);
        self.next_id += 1;
        self.generators.insert(id, record);
        id
    }
}

impl AudioBackend for OfflineGraph {
    type Bus = BusId;
    type Generator = GeneratorId;

    fn current_time(&self) -> f64 {
        self.now
    }

    fn create_bus(&mut self, gain: f32) -> Result<BusId, AudioError> {
        self.buses.push(BusRecord {
            initial: gain,
            automation: Vec::new(),
        });
        Ok(BusId(self.buses.len() - 1))
    }

    fn bus_gain(&self, bus: &BusId) -> f32 {
        self.bus_value_at(*bus, self.now)
    }

    fn automate_bus(&mut self, bus: &BusId, steps: &[Automation]) -> Result<(), AudioError> {
        let record = self
            .buses
            .get_mut(bus.0)
            .ok_or_else(|| AudioError::Scheduling(format!("unknown bus {:?}", bus)))?;
        record.automation.extend_from_slice(steps);
        Ok(())
    }

    fn start_voice(
        &mut self,
        voice: &ScheduledVoice,
        bus: &BusId,
    ) -> Result<GeneratorId, AudioError> {
        if bus.0 >= self.buses.len() {
            return Err(AudioError::NodeCreation {
                node: "voice",
                reason: format!("unknown bus {:?}", bus),
            });
        }
        Ok(self.insert(GeneratorRecord {
            waveform: voice.waveform,
            routing: Routing::Bus(*bus),
            frequency: voice.frequency.to_vec(),
            gain: voice.gain.to_vec(),
            start: voice.start,
            stop: voice.stop,
        }))
    }

    fn start_modulator(
        &mut self,
        modulator: &Modulator,
        target: &GeneratorId,
        at: f64,
    ) -> Result<GeneratorId, AudioError> {
        if !self.generators.contains_key(target) {
            return Err(AudioError::NodeCreation {
                node: "modulator",
                reason: format!("unknown target {:?}", target),
            });
        }
        Ok(self.insert(GeneratorRecord {
            waveform: Waveform::Sine,
            routing: Routing::Frequency {
                target: *target,
                depth_hz: modulator.depth_hz,
            },
            frequency: vec![Automation::SetValue {
                value: modulator.rate_hz,
                at,
            }],
            gain: vec![Automation::SetValue {
                value: modulator.depth_hz,
                at,
            }],
            start: at,
            stop: None,
        }))
    }

    fn stop(&mut self, generator: &GeneratorId, at: f64) {
        if let Some(g) = self.generators.get_mut(generator) {
            if g.stop.is_none() {
                g.stop = Some(at);
            }
        }
    }
}

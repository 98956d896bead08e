//! Seam between the tone engine and an audio graph implementation.

use crate::envelope::Automation;
use crate::error::AudioError;
use crate::tone::{Modulator, ScheduledVoice};

/// A live audio graph: gain buses feeding the output, plus oscillator voices
/// scheduled against a monotonically increasing clock.
///
/// Implemented by the WebAudio backend in the web frontend and by
/// [`OfflineGraph`](crate::OfflineGraph) for tests and headless hosts.
pub trait AudioBackend {
    type Bus;
    type Generator;

    /// Audio clock in seconds.
    fn current_time(&self) -> f64;

    /// A gain stage wired straight to the output.
    fn create_bus(&mut self, gain: f32) -> Result<Self::Bus, AudioError>;

    /// Gain the bus is producing right now, for anchoring fades.
    fn bus_gain(&self, bus: &Self::Bus) -> f32;

    fn automate_bus(&mut self, bus: &Self::Bus, steps: &[Automation]) -> Result<(), AudioError>;

    /// Build an oscillator + gain pair into `bus`. Voices with a stop time are
    /// fully scheduled here and need no further calls.
    fn start_voice(
        &mut self,
        voice: &ScheduledVoice,
        bus: &Self::Bus,
    ) -> Result<Self::Generator, AudioError>;

    /// Start `modulator` at `at`, added to `target`'s frequency.
    fn start_modulator(
        &mut self,
        modulator: &Modulator,
        target: &Self::Generator,
        at: f64,
    ) -> Result<Self::Generator, AudioError>;

    /// Schedule a halt. Repeated calls for the same generator are ignored.
    fn stop(&mut self, generator: &Self::Generator, at: f64);
}

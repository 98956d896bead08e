use crate::constants::*;
use crate::envelope::{Automation, Envelope, Timeline};
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bus {
    Ambient,
    Effects,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneKind {
    Hover,
    Click,
    Transition,
    AmbientDrone,
}

/// One oscillator + gain pair inside a [`ToneEvent`].
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceSpec {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    /// Exponential sweep target reached at the end of the voice.
    pub sweep_to_hz: Option<f32>,
    pub offset_sec: f64,
    /// `None` sounds until explicitly stopped.
    pub duration_sec: Option<f64>,
    pub peak_gain: f32,
    pub envelope: Envelope,
}

impl VoiceSpec {
    fn one_shot(
        waveform: Waveform,
        frequency_hz: f32,
        offset_sec: f64,
        duration_sec: f64,
        peak_gain: f32,
    ) -> Self {
        Self {
            waveform,
            frequency_hz,
            sweep_to_hz: None,
            offset_sec,
            duration_sec: Some(duration_sec),
            peak_gain,
            envelope: Envelope::Decay,
        }
    }
}

/// Slow oscillator added to one voice's frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modulator {
    pub rate_hz: f32,
    pub depth_hz: f32,
    /// Index into the event's voices.
    pub target: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToneEvent {
    pub kind: ToneKind,
    pub voices: SmallVec<[VoiceSpec; 3]>,
    pub modulator: Option<Modulator>,
    pub bus: Bus,
}

/// A voice resolved against the audio clock, ready for a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledVoice {
    pub waveform: Waveform,
    pub frequency: Timeline,
    pub gain: Timeline,
    pub start: f64,
    pub stop: Option<f64>,
}

impl ToneEvent {
    pub fn hover() -> Self {
        Self {
            kind: ToneKind::Hover,
            voices: smallvec![VoiceSpec::one_shot(
                Waveform::Triangle,
                HOVER_FREQUENCY_HZ,
                0.0,
                HOVER_DURATION_SEC,
                HOVER_PEAK_GAIN,
            )],
            modulator: None,
            bus: Bus::Effects,
        }
    }

    /// Rising three-note chime.
    pub fn click() -> Self {
        let voices = CLICK_FREQUENCIES_HZ
            .iter()
            .enumerate()
            .map(|(i, &hz)| {
                VoiceSpec::one_shot(
                    Waveform::Sine,
                    hz,
                    i as f64 * CLICK_STAGGER_SEC,
                    CLICK_DURATION_SEC,
                    CLICK_PEAK_GAIN,
                )
            })
            .collect();
        Self {
            kind: ToneKind::Click,
            voices,
            modulator: None,
            bus: Bus::Effects,
        }
    }

    pub fn transition() -> Self {
        Self {
            kind: ToneKind::Transition,
            voices: smallvec![VoiceSpec {
                waveform: Waveform::Sine,
                frequency_hz: TRANSITION_FROM_HZ,
                sweep_to_hz: Some(TRANSITION_TO_HZ),
                offset_sec: 0.0,
                duration_sec: Some(TRANSITION_DURATION_SEC),
                peak_gain: TRANSITION_PEAK_GAIN,
                envelope: Envelope::AttackDecay {
                    attack_sec: TRANSITION_ATTACK_SEC,
                },
            }],
            modulator: None,
            bus: Bus::Effects,
        }
    }

    /// Sustained drone layers; the modulator only drifts the root layer.
    pub fn ambient_drone() -> Self {
        let voices = DRONE_FREQUENCIES_HZ
            .iter()
            .zip(DRONE_LAYER_GAINS.iter())
            .map(|(&hz, &gain)| VoiceSpec {
                waveform: Waveform::Sine,
                frequency_hz: hz,
                sweep_to_hz: None,
                offset_sec: 0.0,
                duration_sec: None,
                peak_gain: gain,
                envelope: Envelope::Sustain,
            })
            .collect();
        Self {
            kind: ToneKind::AmbientDrone,
            voices,
            modulator: Some(Modulator {
                rate_hz: DRONE_LFO_HZ,
                depth_hz: DRONE_LFO_DEPTH_HZ,
                target: DRONE_LFO_TARGET_LAYER,
            }),
            bus: Bus::Ambient,
        }
    }

    /// Non-negative offsets and durations, positive frequencies, modulator
    /// pointing at an existing voice.
    pub fn is_well_formed(&self) -> bool {
        let voices_ok = self.voices.iter().all(|v| {
            v.frequency_hz > 0.0
                && v.sweep_to_hz.map_or(true, |hz| hz > 0.0)
                && v.offset_sec >= 0.0
                && v.duration_sec.map_or(true, |d| d >= 0.0)
        });
        let modulator_ok = self
            .modulator
            .map_or(true, |m| m.target < self.voices.len() && m.rate_hz > 0.0);
        voices_ok && modulator_ok
    }

    /// Resolve every voice against `now` on the audio clock.
    pub fn schedule(&self, now: f64) -> impl Iterator<Item = ScheduledVoice> + '_ {
        debug_assert!(self.is_well_formed(), "malformed tone event {:?}", self.kind);
        self.voices.iter().map(move |v| {
            let start = now + v.offset_sec;
            let stop = v.duration_sec.map(|d| start + d);
            let mut frequency: Timeline = smallvec![Automation::SetValue {
                value: v.frequency_hz,
                at: start,
            }];
            if let (Some(to), Some(end)) = (v.sweep_to_hz, stop) {
                frequency.push(Automation::exponential(to, end));
            }
            ScheduledVoice {
                waveform: v.waveform,
                frequency,
                gain: v.envelope.timeline(v.peak_gain, start, v.duration_sec),
                start,
                stop,
            }
        })
    }
}

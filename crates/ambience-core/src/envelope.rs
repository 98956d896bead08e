//! Parameter automation against the audio clock.
//!
//! An [`Automation`] mirrors one `AudioParam` scheduling call. Envelopes and
//! bus fades are built as short timelines of these steps; the web backend
//! forwards them verbatim and [`evaluate`] reproduces the resulting curve for
//! the offline graph.

use crate::constants::EXP_RAMP_FLOOR;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Automation {
    /// Drop every pending event at or after `from`.
    Cancel { from: f64 },
    SetValue { value: f32, at: f64 },
    LinearRamp { value: f32, end: f64 },
    ExponentialRamp { value: f32, end: f64 },
}

impl Automation {
    /// Exponential ramp with the target floored above zero.
    pub fn exponential(value: f32, end: f64) -> Self {
        Automation::ExponentialRamp {
            value: value.max(EXP_RAMP_FLOOR),
            end,
        }
    }

    fn time(&self) -> f64 {
        match *self {
            Automation::Cancel { from } => from,
            Automation::SetValue { at, .. } => at,
            Automation::LinearRamp { end, .. } | Automation::ExponentialRamp { end, .. } => end,
        }
    }
}

pub type Timeline = SmallVec<[Automation; 4]>;

/// Gain shape of a single voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Envelope {
    /// Jump to peak and hold until stopped.
    Sustain,
    /// Start at peak, decay exponentially to the floor by the end.
    Decay,
    /// Rise linearly from silence over `attack_sec`, then decay exponentially.
    AttackDecay { attack_sec: f64 },
}

impl Envelope {
    /// Gain timeline for a voice sounding from `start` for `duration` seconds.
    /// Always opens with a cancel + anchor so retriggers never jump.
    pub fn timeline(&self, peak: f32, start: f64, duration: Option<f64>) -> Timeline {
        let mut steps: Timeline = smallvec![Automation::Cancel { from: start }];
        match (*self, duration) {
            (Envelope::Sustain, _) | (_, None) => {
                steps.push(Automation::SetValue { value: peak, at: start });
            }
            (Envelope::Decay, Some(d)) => {
                steps.push(Automation::SetValue { value: peak, at: start });
                steps.push(Automation::exponential(EXP_RAMP_FLOOR, start + d));
            }
            (Envelope::AttackDecay { attack_sec }, Some(d)) => {
                steps.push(Automation::SetValue { value: 0.0, at: start });
                steps.push(Automation::LinearRamp {
                    value: peak,
                    end: start + attack_sec.min(d),
                });
                steps.push(Automation::exponential(EXP_RAMP_FLOOR, start + d));
            }
        }
        steps
    }
}

/// Cancel pending changes, pin `current` at `now`, then ramp linearly to
/// `target` over `duration` seconds.
pub fn fade(current: f32, target: f32, now: f64, duration: f64) -> Timeline {
    smallvec![
        Automation::Cancel { from: now },
        Automation::SetValue { value: current, at: now },
        Automation::LinearRamp {
            value: target,
            end: now + duration,
        },
    ]
}

/// Value of a parameter at time `t` given its default value and every
/// automation step applied to it, in call order.
pub fn evaluate(default: f32, steps: &[Automation], t: f64) -> f32 {
    // Resolve cancels first: each one only removes events scheduled before it.
    let mut events: Vec<Automation> = Vec::with_capacity(steps.len());
    for step in steps {
        match *step {
            Automation::Cancel { from } => events.retain(|e| e.time() < from),
            other => events.push(other),
        }
    }
    events.sort_by(|a, b| a.time().total_cmp(&b.time()));

    let mut prev_time = 0.0_f64;
    let mut prev_value = default;
    for event in &events {
        let time = event.time();
        if time <= t {
            prev_time = time;
            prev_value = match *event {
                Automation::SetValue { value, .. }
                | Automation::LinearRamp { value, .. }
                | Automation::ExponentialRamp { value, .. } => value,
                Automation::Cancel { .. } => prev_value,
            };
            continue;
        }
        let span = time - prev_time;
        let progress = if span > 0.0 {
            ((t - prev_time) / span) as f32
        } else {
            1.0
        };
        return match *event {
            Automation::LinearRamp { value, .. } => prev_value + (value - prev_value) * progress,
            Automation::ExponentialRamp { value, .. } => {
                if prev_value == 0.0 || (prev_value > 0.0) != (value > 0.0) {
                    prev_value
                } else {
                    prev_value * (value / prev_value).powf(progress)
                }
            }
            // a future set-value holds the current value until it fires
            _ => prev_value,
        };
    }
    prev_value
}

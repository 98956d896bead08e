use ambience_core::{AudioBackend, AudioError, Automation, Modulator, ScheduledVoice, Waveform};
use std::cell::Cell;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// WebAudio implementation of the tone engine's graph.
pub struct WebAudioBackend {
    ctx: web::AudioContext,
}

/// An oscillator and the gain stage it feeds.
pub struct WebGenerator {
    osc: web::OscillatorNode,
    // held so the node outlives the generator handle
    _gain: web::GainNode,
    stopped: Cell<bool>,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &'static str,
) -> Result<web::GainNode, AudioError> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(AudioError::NodeCreation {
                node: label,
                reason: format!("{:?}", e),
            })
        }
    }
}

fn create_oscillator(
    audio_ctx: &web::AudioContext,
    waveform: Waveform,
) -> Result<web::OscillatorNode, AudioError> {
    let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("OscillatorNode error: {:?}", e);
        AudioError::NodeCreation {
            node: "oscillator",
            reason: format!("{:?}", e),
        }
    })?;
    match waveform {
        Waveform::Sine => osc.set_type(web::OscillatorType::Sine),
        Waveform::Triangle => osc.set_type(web::OscillatorType::Triangle),
    }
    Ok(osc)
}

/// Forward each step to the matching `AudioParam` call.
fn apply_automation(param: &web::AudioParam, steps: &[Automation]) -> Result<(), AudioError> {
    for step in steps {
        let res = match *step {
            Automation::Cancel { from } => param.cancel_scheduled_values(from),
            Automation::SetValue { value, at } => param.set_value_at_time(value, at),
            Automation::LinearRamp { value, end } => param.linear_ramp_to_value_at_time(value, end),
            Automation::ExponentialRamp { value, end } => {
                param.exponential_ramp_to_value_at_time(value, end)
            }
        };
        res.map_err(|e| AudioError::Scheduling(format!("{:?}: {:?}", step, e)))?;
    }
    Ok(())
}

fn connect_err(e: wasm_bindgen::JsValue) -> AudioError {
    AudioError::Scheduling(format!("connect: {:?}", e))
}

impl WebAudioBackend {
    /// Create the `AudioContext`. Must run inside a user gesture handler or the
    /// browser keeps the context suspended.
    pub fn open() -> Result<Self, AudioError> {
        let ctx =
            web::AudioContext::new().map_err(|e| AudioError::Unsupported(format!("{:?}", e)))?;
        if ctx.state() == web::AudioContextState::Suspended {
            if let Ok(promise) = ctx.resume() {
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("AudioContext resume rejected: {:?}", e);
                    }
                });
            }
        }
        Ok(Self { ctx })
    }
}

impl AudioBackend for WebAudioBackend {
    type Bus = web::GainNode;
    type Generator = WebGenerator;

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn create_bus(&mut self, gain: f32) -> Result<web::GainNode, AudioError> {
        let bus = create_gain(&self.ctx, gain, "bus")?;
        bus.connect_with_audio_node(&self.ctx.destination())
            .map_err(connect_err)?;
        Ok(bus)
    }

    fn bus_gain(&self, bus: &web::GainNode) -> f32 {
        bus.gain().value()
    }

    fn automate_bus(
        &mut self,
        bus: &web::GainNode,
        steps: &[Automation],
    ) -> Result<(), AudioError> {
        apply_automation(&bus.gain(), steps)
    }

    fn start_voice(
        &mut self,
        voice: &ScheduledVoice,
        bus: &web::GainNode,
    ) -> Result<WebGenerator, AudioError> {
        let osc = create_oscillator(&self.ctx, voice.waveform)?;
        let gain = create_gain(&self.ctx, 0.0, "voice")?;
        apply_automation(&osc.frequency(), &voice.frequency)?;
        apply_automation(&gain.gain(), &voice.gain)?;
        osc.connect_with_audio_node(&gain).map_err(connect_err)?;
        gain.connect_with_audio_node(bus).map_err(connect_err)?;
        osc.start_with_when(voice.start)
            .map_err(|e| AudioError::Scheduling(format!("start: {:?}", e)))?;
        let stopped = match voice.stop {
            Some(at) => {
                _ = osc.stop_with_when(at);
                true
            }
            None => false,
        };
        Ok(WebGenerator {
            osc,
            _gain: gain,
            stopped: Cell::new(stopped),
        })
    }

    fn start_modulator(
        &mut self,
        modulator: &Modulator,
        target: &WebGenerator,
        at: f64,
    ) -> Result<WebGenerator, AudioError> {
        let lfo = create_oscillator(&self.ctx, Waveform::Sine)?;
        lfo.frequency().set_value(modulator.rate_hz);
        let depth = create_gain(&self.ctx, modulator.depth_hz, "lfo depth")?;
        lfo.connect_with_audio_node(&depth).map_err(connect_err)?;
        depth
            .connect_with_audio_param(&target.osc.frequency())
            .map_err(connect_err)?;
        lfo.start_with_when(at)
            .map_err(|e| AudioError::Scheduling(format!("start: {:?}", e)))?;
        Ok(WebGenerator {
            osc: lfo,
            _gain: depth,
            stopped: Cell::new(false),
        })
    }

    fn stop(&mut self, generator: &WebGenerator, at: f64) {
        if generator.stopped.replace(true) {
            return;
        }
        _ = generator.osc.stop_with_when(at);
    }
}

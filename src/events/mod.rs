use crate::audio::WebAudioBackend;
use ambience_core::ToneEngine;
use std::cell::RefCell;
use std::rc::Rc;

pub mod gesture;
pub mod motion;
pub mod pointer;
pub mod reveal;
pub mod scroll;

pub type SharedEngine = Rc<RefCell<ToneEngine<WebAudioBackend>>>;

pub use gesture::{wire_audio_unlock, wire_mute_toggle};
pub use motion::apply_reduced_motion;
pub use pointer::{wire_interaction_sounds, wire_parallax, wire_ripples, wire_tilt_cards};
pub use reveal::wire_reveal;
pub use scroll::{wire_scroll_effects, wire_smooth_anchors};

pub mod backend;
pub mod blob;
pub mod clock;
pub mod constants;
pub mod effects;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod offline;
pub mod prefs;
pub mod tone;

pub use backend::AudioBackend;
pub use blob::*;
pub use clock::*;
pub use constants::*;
pub use engine::*;
pub use envelope::{Automation, Envelope, Timeline};
pub use error::AudioError;
pub use offline::*;
pub use prefs::*;
pub use tone::*;

use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Storage key for the persisted mute flag.
pub const MUTED_KEY: &str = "audioMuted";

/// Persistent key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    /// Anything other than the literal `"true"` reads as unmuted.
    fn load_muted(&self) -> bool {
        self.get(MUTED_KEY).as_deref() == Some("true")
    }

    fn save_muted(&mut self, muted: bool) {
        self.set(MUTED_KEY, if muted { "true" } else { "false" });
    }
}

/// In-memory store; clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<FnvHashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

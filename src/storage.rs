use ambience_core::PreferenceStore;
use web_sys as web;

/// `window.localStorage`, degrading to a no-op when storage is blocked.
pub struct LocalStorageStore {
    storage: Option<web::Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(s) = &self.storage {
            if let Err(e) = s.set_item(key, value) {
                log::warn!("localStorage.setItem({}) failed: {:?}", key, e);
            }
        }
    }
}

//! `PreferenceStore` backed by `window.localStorage`.

use particle_field_core::theme::PreferenceStore;
use web_sys::{Storage, Window};

/// Falls back to a no-op store when storage is unavailable (private mode,
/// sandboxed iframes); the theme then just follows the system preference.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable; theme preference will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("failed to persist {key}: {e:?}");
            }
        }
    }
}

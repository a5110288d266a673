use kirana_common::theme::ThemeStore;
#[cfg(not(target_family = "wasm"))]
use kirana_common::theme::MemoryThemeStore;

/// Theme preference kept in the browser's `localStorage`.
///
/// Native builds have no `localStorage`; the preference then lasts only as
/// long as the process.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageThemeStore {
    #[cfg(not(target_family = "wasm"))]
    fallback: MemoryThemeStore,
}

#[cfg(target_family = "wasm")]
impl LocalStorageThemeStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_family = "wasm")]
impl ThemeStore for LocalStorageThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::warn!("Could not persist {key}: {:?}", e);
                }
            }
            None => tracing::warn!("localStorage unavailable, {key} not persisted"),
        }
    }
}

#[cfg(not(target_family = "wasm"))]
impl ThemeStore for LocalStorageThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.fallback.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.fallback.set(key, value);
    }
}

use gloo::storage::{LocalStorage, Storage};
use shared::error::ClientError;
use shared::settings::KeyValueStore;

/// Send the whole page to `url` (used for OAuth consent screens).
pub fn redirect(url: &str) -> Result<(), ClientError> {
    let window = web_sys::window().ok_or_else(|| ClientError::Browser("no window".into()))?;
    window
        .location()
        .set_href(url)
        .map_err(|e| ClientError::Browser(format!("redirect failed: {:?}", e)))
}

/// Device-local settings backed by `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        LocalStorage::set(key, value).map_err(|e| {
            tracing::error!("Failed to write {} to local storage: {}", key, e);
            ClientError::Browser(e.to_string())
        })
    }
}

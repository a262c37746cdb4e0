//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Viewport size
//! - Storage (LocalStorage on web, nothing on native)

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Viewport reported on native, where there is no window
pub const NATIVE_VIEWPORT: (f32, f32) = (480.0, 640.0);

/// Monotonic milliseconds (performance.now() on web)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Monotonic milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Current window size in CSS pixels
#[cfg(target_arch = "wasm32")]
pub fn viewport_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return NATIVE_VIEWPORT;
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_size() -> (f32, f32) {
    NATIVE_VIEWPORT
}

/// Read a JSON value from LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let json = storage.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable {}: {}", key, e);
            None
        }
    }
}

/// Write a JSON value to LocalStorage. Returns false if storage is unavailable.
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    else {
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn test_native_storage_is_empty() {
        assert!(!save_json("key", &42u32));
        assert_eq!(load_json::<u32>("key"), None);
    }
}

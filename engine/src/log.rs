//! Logging facade: browser console on wasm32, `tracing` events elsewhere.

#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(msg: &str) {
    tracing::info!("{msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    tracing::warn!("{msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    tracing::error!("{msg}");
}

/// Milliseconds from an arbitrary origin, for `[perf]` lines
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

//! Drift Web Platform
//!
//! DOM integration for browsers, compiled for `wasm32`.
//!
//! This crate implements [`drift_platform::Host`] over `web-sys`:
//!
//! - **Elements** are found by class and tagged with a `data-drift-id`
//!   attribute so observer entries map back to their ids
//! - **Frames** come from `requestAnimationFrame`; the pending request is
//!   cancelled when the host is dropped
//! - **Input** listeners are registered passive
//! - **Intersections** come from native `IntersectionObserver`s
//!
//! # Usage
//!
//! ```ignore
//! use drift_app::DriftConfig;
//! use wasm_bindgen::prelude::*;
//!
//! #[wasm_bindgen(start)]
//! pub fn main() -> Result<(), JsValue> {
//!     drift_platform_web::start(DriftConfig::default())
//!         .map_err(|e| JsValue::from_str(&e.to_string()))?
//!         .forget();
//!     Ok(())
//! }
//! ```

pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod host;
#[cfg(target_arch = "wasm32")]
pub mod input;
#[cfg(target_arch = "wasm32")]
mod runner;

#[cfg(target_arch = "wasm32")]
pub use host::{EventQueue, WebHost};
#[cfg(target_arch = "wasm32")]
pub use runner::{start, DriftHandle};

/// Placeholder for non-wasm builds (cross-compilation checks)
#[cfg(not(target_arch = "wasm32"))]
pub fn start(_config: drift_app::DriftConfig) -> Result<(), drift_platform::PlatformError> {
    Err(drift_platform::PlatformError::Unsupported(
        "the web platform is only available on wasm32".to_string(),
    ))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use drift_platform::PlatformError;

    #[test]
    fn test_native_start_is_unsupported() {
        let result = start(drift_app::DriftConfig::default());
        assert!(matches!(result, Err(PlatformError::Unsupported(_))));
    }
}

//! Drift Platform Abstraction
//!
//! This crate defines the contract between the Drift components and the page
//! they decorate:
//!
//! - [`Host`]: element queries, style and class writes, frame requests,
//!   listener registration and intersection observers
//! - [`HostEvent`]: frames, input and intersection notifications flowing back
//! - [`HeadlessHost`]: a deterministic in-memory page for tests and headless runs
//!
//! Browser support lives in the `drift_platform_web` extension.

pub mod error;
pub mod headless;
pub mod host;
pub mod margin;

pub use error::{PlatformError, Result};
pub use headless::{ClassChange, HeadlessHost, FRAME_INTERVAL_MS};
pub use host::{Host, HostEvent, IntersectionEntry, ObserverOptions};
pub use margin::{Length, MarginParseError, RootMargin};

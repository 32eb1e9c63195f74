//! Platform abstraction layer
//!
//! Browser wiring lives in `web` (wasm32 only): the DOM surface, handle
//! press listeners and the global move/release listeners.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{ChartHandle, DomSurface, DonutChart};

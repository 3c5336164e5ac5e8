//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (buffered between ticks)
//! - The wasm-bindgen bridge the page script talks to

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Direction, InputBuffer};

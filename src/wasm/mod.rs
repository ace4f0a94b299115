//! WebAssembly bindings for the core6502 emulator.
//!
//! Exposes a JavaScript-callable `Emulator6502` wrapping a CPU over flat
//! 64 KiB memory.

pub mod api;

pub use api::{Emulator6502, JsError};

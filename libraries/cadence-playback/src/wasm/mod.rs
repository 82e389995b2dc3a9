//! WASM bindings for cadence-playback
//!
//! This module provides WebAssembly bindings for the PlaybackSequencer,
//! so the browser front end can drive sequencing from JavaScript.

pub mod sequencer;

pub use sequencer::WasmSequencer;

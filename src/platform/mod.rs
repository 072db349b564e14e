//! Platform abstraction layer
//!
//! Handles browser/native differences for keyboard input. Events arrive
//! asynchronously; the loop only ever sees the held-key set as it stands at
//! a tick boundary.

pub mod input;

pub use input::{InputState, normalize_key};

//! Orbit camera for inspecting a molecule.
//!
//! The camera circles a focus point at a distance, driven by per-frame
//! pointer snapshots: drag to orbit, shift-drag to pan, scroll to zoom.

/// Pointer snapshots and event accumulation.
pub mod input;
/// Orbit state and pose derivation.
pub mod orbit;

pub use input::{InputEvent, InputSnapshot, InputState};
pub use orbit::{CameraPose, OrbitCamera};

// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Geometry, orbit camera and color-ID picking core for small-molecule
//! viewers.
//!
//! Molscope produces renderer-agnostic triangle meshes for ball-and-stick
//! molecules and the interaction state around them. Uploading meshes,
//! drawing passes and reading pixels back belong to the host renderer.
//!
//! # Key entry points
//!
//! - [`geometry::generate_sphere`] / [`geometry::generate_cylinder`] - atom
//!   and bond meshes
//! - [`camera::OrbitCamera`] - mouse-driven orbit, pan and zoom
//! - [`picking`] - identifier allocation, color encoding and click-to-select
//! - [`molecule::Molecule`] - atoms, bonds and selection kept in sync with
//!   their pick IDs
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Picking
//!
//! Atoms and bond segments live in separate identifier spaces. A click
//! renders the atom pass first and only falls back to the bond pass when no
//! atom is under the cursor; see [`picking::PickMap::pick`].

pub mod camera;
pub mod error;
pub mod geometry;
pub mod molecule;
pub mod options;
pub mod picking;

pub use error::MolscopeError;

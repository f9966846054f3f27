//! Centralized viewer options with TOML preset support.
//!
//! Camera behavior, tessellation detail and the bond/selection palette are
//! consolidated here. Options serialize to/from TOML so a viewer can keep
//! presets on disk.

mod camera;
mod colors;
mod geometry;

use std::path::Path;

pub use camera::{AngleWrap, CameraOptions};
pub use colors::ColorOptions;
pub use geometry::GeometryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolscopeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit camera parameters.
    pub camera: CameraOptions,
    /// Sphere and cylinder tessellation parameters.
    pub geometry: GeometryOptions,
    /// Bond and selection colors.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::Io`] if the file cannot be read,
    /// [`MolscopeError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MolscopeError> {
        let content = std::fs::read_to_string(path).map_err(MolscopeError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| MolscopeError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::Io`] on filesystem failure,
    /// [`MolscopeError::OptionsParse`] if the options cannot be serialized.
    pub fn save(&self, path: &Path) -> Result<(), MolscopeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolscopeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolscopeError::Io)?;
        }
        std::fs::write(path, content).map_err(MolscopeError::Io)?;
        log::info!("saved options to {}", path.display());
        Ok(())
    }

    /// Names of the presets (`*.toml` file stems) in `dir`, sorted.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::Io`] if the directory cannot be read.
    pub fn list_presets(dir: &Path) -> Result<Vec<String>, MolscopeError> {
        let mut names: Vec<String> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(std::ffi::OsStr::to_str)
                    .map(str::to_owned)
            })
            .collect();
        names.sort();
        log::debug!("{} presets in {}", names.len(), dir.display());
        Ok(names)
    }
}

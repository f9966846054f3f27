use serde::{Deserialize, Serialize};

/// Color palette for bonds and selection highlights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color of bond tubes.
    pub bond: [f32; 3],
    /// RGB color of selection halos around atoms and bonds.
    pub selection: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            bond: [0.3, 0.3, 0.3],
            selection: [0.5, 0.5, 0.0],
        }
    }
}

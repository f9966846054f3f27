use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_SUBDIVISION_DEPTH;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Tessellation and sizing options for atom spheres and bond tubes.
pub struct GeometryOptions {
    /// Icosphere subdivision depth for atoms.
    #[schemars(title = "Sphere Detail", range(min = 0, max = 6))]
    pub sphere_subdivision_depth: u32,
    /// Number of segments around each bond tube.
    #[schemars(title = "Bond Smoothness", range(min = 3, max = 240))]
    pub cylinder_smoothness: u32,
    /// Bond tube radius.
    #[schemars(title = "Bond Radius", range(min = 0.02, max = 1.0), extend("step" = 0.01))]
    pub bond_radius: f32,
    /// Distance of each double-bond tube from the bond axis.
    #[schemars(skip)]
    pub double_bond_offset: f32,
    /// Distance of the outer triple-bond tubes from the bond axis.
    #[schemars(skip)]
    pub triple_bond_offset: f32,
    /// Extra radius of the halo drawn around selected atoms.
    #[schemars(skip)]
    pub atom_selection_padding: f32,
    /// Extra radius of the halo drawn around selected bonds.
    #[schemars(skip)]
    pub bond_selection_padding: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            sphere_subdivision_depth: DEFAULT_SUBDIVISION_DEPTH,
            cylinder_smoothness: 120,
            bond_radius: 0.2,
            double_bond_offset: 0.4,
            triple_bond_offset: 0.8,
            atom_selection_padding: 0.1,
            bond_selection_padding: 0.2,
        }
    }
}

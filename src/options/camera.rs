use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How accumulated orbit angles are folded back into range.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AngleWrap {
    /// Truncated remainder by 360 degrees: the result keeps the sign of the
    /// angle and lies in (-360, 360). 400 becomes 40, -400 becomes -40.
    #[default]
    Degrees,
    /// Once the magnitude exceeds 2π, take the remainder by π, applied to
    /// the degree value as-is. Kept for parity with older viewer builds.
    Legacy,
}

impl AngleWrap {
    /// Fold `angle` (degrees) according to this mode.
    #[must_use]
    pub fn apply(self, angle: f32) -> f32 {
        match self {
            Self::Degrees => angle % 360.0,
            Self::Legacy => {
                if angle.abs() > std::f32::consts::TAU {
                    angle % std::f32::consts::PI
                } else {
                    angle
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit camera defaults and control parameters.
pub struct CameraOptions {
    /// Degrees of rotation per pixel of mouse travel.
    #[schemars(title = "Mouse Sensitivity", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub mouse_sensitivity: f32,
    /// Orbit distance at construction.
    #[schemars(skip)]
    pub initial_distance: f32,
    /// Vertical orbit angle (degrees) at construction and after a reset.
    #[schemars(skip)]
    pub initial_vertical_angle: f32,
    /// Horizontal orbit angle (degrees) at construction and after a reset.
    #[schemars(skip)]
    pub initial_horizontal_angle: f32,
    /// Closest the camera may get to its focus.
    #[schemars(title = "Minimum Distance", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub min_distance: f32,
    /// Focus translation per pixel of mouse travel in pan mode.
    #[schemars(title = "Pan Speed", range(min = 0.001, max = 0.5), extend("step" = 0.001))]
    pub pan_speed: f32,
    /// Lock each drag to the axis of its initial motion.
    #[schemars(title = "Lock Drag Axis")]
    pub lock_drag_axis: bool,
    /// Angle folding behavior.
    #[schemars(skip)]
    pub angle_wrap: AngleWrap,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            initial_distance: 10.0,
            initial_vertical_angle: -45.0,
            initial_horizontal_angle: 30.0,
            min_distance: 0.1,
            pan_speed: 0.05,
            lock_drag_axis: false,
            angle_wrap: AngleWrap::Degrees,
        }
    }
}

//! Orbit camera state and pose derivation.
//!
//! The camera circles a focus point at a fixed distance. Drag deltas rotate
//! or pan it, scroll deltas zoom, and [`OrbitCamera::pose`] turns the state
//! into an eye position and orientation.

use glam::{Mat4, Quat, Vec2, Vec3};

use super::input::InputSnapshot;
use crate::options::CameraOptions;

/// Camera placement derived from the orbit state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-space eye position.
    pub position: Vec3,
    /// Euler rotation in degrees: `(vertical, -horizontal, 0)`.
    pub rotation: Vec3,
}

/// Orbit camera circling a focus point.
///
/// Angles are in degrees. The vertical angle tilts the camera about the
/// focus (negative looks down from above), the horizontal angle spins it
/// around the world up axis.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    focus: Vec3,
    distance: f32,
    vertical_angle: f32,
    horizontal_angle: f32,

    options: CameraOptions,

    last_mouse: Option<Vec2>,
    last_scroll: f32,
    rotating_horizontal: bool,
    rotating_vertical: bool,
}

impl OrbitCamera {
    /// Camera at the configured initial distance and angles.
    #[must_use]
    pub fn new(focus: Vec3, options: &CameraOptions) -> Self {
        Self::with_state(
            focus,
            options.initial_distance,
            options.initial_vertical_angle,
            options.initial_horizontal_angle,
            options,
        )
    }

    /// Camera at an explicit orbit state. `reset_view` still returns to the
    /// configured initial angles.
    #[must_use]
    pub fn with_state(
        focus: Vec3,
        distance: f32,
        vertical_angle: f32,
        horizontal_angle: f32,
        options: &CameraOptions,
    ) -> Self {
        Self {
            focus,
            distance: distance.max(options.min_distance),
            vertical_angle,
            horizontal_angle,
            options: options.clone(),
            last_mouse: None,
            last_scroll: 0.0,
            rotating_horizontal: false,
            rotating_vertical: false,
        }
    }

    /// Apply one frame of pointer input and return the new pose.
    ///
    /// Mouse and scroll deltas are taken against the previous snapshot; the
    /// very first snapshot only seeds the mouse position.
    pub fn update(&mut self, input: &InputSnapshot) -> CameraPose {
        let mouse = Vec2::new(input.mouse_x, input.mouse_y);
        let delta = self.last_mouse.map_or(Vec2::ZERO, |last| mouse - last);
        self.last_mouse = Some(mouse);

        let scroll = input.scroll_y - self.last_scroll;
        self.last_scroll = input.scroll_y;

        if input.primary_button {
            if input.pan_modifier {
                self.pan(delta);
            } else {
                self.rotate(delta);
            }
        } else {
            self.rotating_horizontal = false;
            self.rotating_vertical = false;
        }

        if scroll != 0.0 {
            self.zoom(scroll);
        }

        self.pose()
    }

    /// Orbit by a mouse delta in pixels.
    ///
    /// Dragging right increases the horizontal angle, dragging down
    /// decreases the vertical angle. With `lock_drag_axis` set, the first
    /// non-zero delta of a drag picks the dominant axis and only that axis
    /// moves until the button is released.
    pub fn rotate(&mut self, delta: Vec2) {
        let sensitivity = self.options.mouse_sensitivity;
        let (mut horizontal, mut vertical) = (true, true);

        if self.options.lock_drag_axis {
            if !self.rotating_horizontal && !self.rotating_vertical {
                if delta == Vec2::ZERO {
                    return;
                }
                if delta.x.abs() >= delta.y.abs() {
                    self.rotating_horizontal = true;
                } else {
                    self.rotating_vertical = true;
                }
            }
            horizontal = self.rotating_horizontal;
            vertical = self.rotating_vertical;
        }

        let wrap = self.options.angle_wrap;
        if vertical {
            self.vertical_angle =
                wrap.apply(self.vertical_angle - delta.y * sensitivity);
        }
        if horizontal {
            self.horizontal_angle =
                wrap.apply(self.horizontal_angle + delta.x * sensitivity);
        }
    }

    /// Translate the focus in the camera's screen plane.
    pub fn pan(&mut self, delta: Vec2) {
        let orientation = self.orientation();
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;
        let speed = self.options.pan_speed;

        self.focus += right * (-delta.x * speed) + up * (delta.y * speed);
    }

    /// Move towards (positive) or away from (negative) the focus, stopping
    /// at the minimum distance.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(self.options.min_distance);
    }

    /// Restore the initial angles. Distance and focus are kept.
    pub fn reset_view(&mut self) {
        self.vertical_angle = self.options.initial_vertical_angle;
        self.horizontal_angle = self.options.initial_horizontal_angle;
        log::debug!(
            "camera view reset to ({}, {})",
            self.vertical_angle,
            self.horizontal_angle
        );
    }

    /// Re-center the orbit on `focus`.
    pub fn set_focus(&mut self, focus: Vec3) {
        self.focus = focus;
    }

    /// Point the camera orbits.
    #[must_use]
    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    /// Distance from the focus.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Vertical orbit angle in degrees.
    #[must_use]
    pub fn vertical_angle(&self) -> f32 {
        self.vertical_angle
    }

    /// Horizontal orbit angle in degrees.
    #[must_use]
    pub fn horizontal_angle(&self) -> f32 {
        self.horizontal_angle
    }

    /// Whether a locked drag is currently latched to the horizontal axis.
    #[must_use]
    pub fn rotating_horizontal(&self) -> bool {
        self.rotating_horizontal
    }

    /// Whether a locked drag is currently latched to the vertical axis.
    #[must_use]
    pub fn rotating_vertical(&self) -> bool {
        self.rotating_vertical
    }

    /// Eye position on the orbit sphere.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let v = self.vertical_angle.to_radians();
        let h = (-self.horizontal_angle).to_radians();
        let horizontal_distance = self.distance * v.cos();
        let vertical_distance = self.distance * v.sin();

        self.focus
            + Vec3::new(
                horizontal_distance * h.sin(),
                -vertical_distance,
                horizontal_distance * h.cos(),
            )
    }

    /// Current eye position and Euler rotation.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position(),
            rotation: Vec3::new(
                self.vertical_angle,
                -self.horizontal_angle,
                0.0,
            ),
        }
    }

    /// Camera-to-world rotation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y((-self.horizontal_angle).to_radians())
            * Quat::from_rotation_x(self.vertical_angle.to_radians())
    }

    /// World-to-view transform. The focus lands on the view's -Z axis at
    /// `distance`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x((-self.vertical_angle).to_radians())
            * Mat4::from_rotation_y(self.horizontal_angle.to_radians())
            * Mat4::from_translation(-self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AngleWrap;

    const EPS: f32 = 1e-4;

    fn held(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot {
            mouse_x: x,
            mouse_y: y,
            primary_button: true,
            ..InputSnapshot::default()
        }
    }

    fn level_camera(options: &CameraOptions) -> OrbitCamera {
        OrbitCamera::with_state(Vec3::ZERO, 10.0, 0.0, 0.0, options)
    }

    #[test]
    fn starts_at_configured_state() {
        let cam = OrbitCamera::new(Vec3::ONE, &CameraOptions::default());
        assert_eq!(cam.distance(), 10.0);
        assert_eq!(cam.vertical_angle(), -45.0);
        assert_eq!(cam.horizontal_angle(), 30.0);
        assert_eq!(cam.focus(), Vec3::ONE);
    }

    #[test]
    fn position_follows_orbit_formula() {
        let cam = OrbitCamera::new(Vec3::ZERO, &CameraOptions::default());
        let v = (-45.0_f32).to_radians();
        let h = (-30.0_f32).to_radians();
        let expected = Vec3::new(
            10.0 * v.cos() * h.sin(),
            -10.0 * v.sin(),
            10.0 * v.cos() * h.cos(),
        );
        assert!((cam.position() - expected).length() < EPS);
        // Negative vertical angle puts the eye above the focus.
        assert!(cam.position().y > 0.0);
        assert_eq!(cam.pose().rotation, Vec3::new(-45.0, -30.0, 0.0));
    }

    #[test]
    fn scroll_zooms_and_clamps() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, &CameraOptions::default());
        let _ = cam.update(&InputSnapshot::default());
        let _ = cam.update(&InputSnapshot {
            scroll_y: 1.0,
            ..InputSnapshot::default()
        });
        assert!((cam.distance() - 9.0).abs() < EPS);

        let _ = cam.update(&InputSnapshot {
            scroll_y: 100.0,
            ..InputSnapshot::default()
        });
        assert!((cam.distance() - 0.1).abs() < EPS);
    }

    #[test]
    fn drag_rotates_by_sensitivity() {
        let mut cam = level_camera(&CameraOptions::default());
        let _ = cam.update(&held(100.0, 100.0));
        let pose = cam.update(&held(110.0, 120.0));
        assert!((cam.horizontal_angle() - 1.0).abs() < EPS);
        assert!((cam.vertical_angle() + 2.0).abs() < EPS);
        assert!((pose.position - cam.position()).length() < EPS);
    }

    #[test]
    fn first_sample_does_not_jump() {
        let mut cam = level_camera(&CameraOptions::default());
        let _ = cam.update(&held(640.0, 480.0));
        assert_eq!(cam.horizontal_angle(), 0.0);
        assert_eq!(cam.vertical_angle(), 0.0);
    }

    #[test]
    fn released_button_does_not_rotate() {
        let mut cam = level_camera(&CameraOptions::default());
        let _ = cam.update(&InputSnapshot::default());
        let _ = cam.update(&InputSnapshot {
            mouse_x: 50.0,
            mouse_y: 50.0,
            ..InputSnapshot::default()
        });
        assert_eq!(cam.horizontal_angle(), 0.0);
        assert_eq!(cam.vertical_angle(), 0.0);
    }

    #[test]
    fn horizontal_angle_wraps() {
        let opts = CameraOptions::default();
        let mut cam = OrbitCamera::with_state(Vec3::ZERO, 10.0, 0.0, 399.0, &opts);
        let _ = cam.update(&held(0.0, 0.0));
        let _ = cam.update(&held(10.0, 0.0));
        assert!((cam.horizontal_angle() - 40.0).abs() < EPS);

        let legacy = CameraOptions {
            angle_wrap: AngleWrap::Legacy,
            ..CameraOptions::default()
        };
        let mut cam = OrbitCamera::with_state(Vec3::ZERO, 10.0, 0.0, 399.0, &legacy);
        let _ = cam.update(&held(0.0, 0.0));
        let _ = cam.update(&held(10.0, 0.0));
        let expected = 400.0 % std::f32::consts::PI;
        assert!((cam.horizontal_angle() - expected).abs() < EPS);
    }

    #[test]
    fn locked_drag_keeps_initial_axis() {
        let opts = CameraOptions {
            lock_drag_axis: true,
            ..CameraOptions::default()
        };
        let mut cam = level_camera(&opts);
        let _ = cam.update(&held(0.0, 0.0));
        let _ = cam.update(&held(10.0, 3.0));
        assert!(cam.rotating_horizontal());
        assert!(!cam.rotating_vertical());

        // Mostly vertical motion is ignored while latched horizontally.
        let _ = cam.update(&held(12.0, 60.0));
        assert!((cam.horizontal_angle() - 1.2).abs() < EPS);
        assert_eq!(cam.vertical_angle(), 0.0);

        // Release clears the latch; the next drag can pick vertical.
        let _ = cam.update(&InputSnapshot {
            mouse_x: 12.0,
            mouse_y: 60.0,
            ..InputSnapshot::default()
        });
        assert!(!cam.rotating_horizontal());
        let _ = cam.update(&held(13.0, 70.0));
        assert!(cam.rotating_vertical());
        assert!((cam.vertical_angle() + 1.0).abs() < EPS);
        assert!((cam.horizontal_angle() - 1.2).abs() < EPS);
    }

    #[test]
    fn locked_drag_ties_pick_horizontal() {
        let opts = CameraOptions {
            lock_drag_axis: true,
            ..CameraOptions::default()
        };
        let mut cam = level_camera(&opts);
        cam.rotate(Vec2::new(5.0, -5.0));
        assert!(cam.rotating_horizontal());
        assert_eq!(cam.vertical_angle(), 0.0);
    }

    #[test]
    fn reset_view_keeps_distance() {
        let opts = CameraOptions::default();
        let mut cam = OrbitCamera::with_state(Vec3::ZERO, 4.0, 12.0, 80.0, &opts);
        cam.reset_view();
        assert_eq!(cam.vertical_angle(), -45.0);
        assert_eq!(cam.horizontal_angle(), 30.0);
        assert_eq!(cam.distance(), 4.0);
    }

    #[test]
    fn view_matrix_looks_at_focus() {
        let focus = Vec3::new(1.0, -2.0, 3.0);
        let cam = OrbitCamera::new(focus, &CameraOptions::default());
        let view = cam.view_matrix();

        let eye = view.transform_point3(cam.position());
        assert!(eye.length() < EPS);
        let target = view.transform_point3(focus);
        assert!((target - Vec3::new(0.0, 0.0, -10.0)).length() < EPS);
    }

    #[test]
    fn shift_drag_pans_in_screen_plane() {
        let mut cam = level_camera(&CameraOptions::default());
        let pan = |x: f32, y: f32| InputSnapshot {
            pan_modifier: true,
            ..held(x, y)
        };
        let _ = cam.update(&pan(0.0, 0.0));
        let _ = cam.update(&pan(10.0, 0.0));

        // Level camera looking down -Z: dragging right slides the focus left.
        assert!((cam.focus() - Vec3::new(-0.5, 0.0, 0.0)).length() < EPS);
        assert_eq!(cam.horizontal_angle(), 0.0);
        assert!(((cam.position() - cam.focus()).length() - 10.0).abs() < EPS);
    }
}

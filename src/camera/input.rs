//! Platform-agnostic pointer input for the orbit camera.

/// Pointer state sampled once per frame by the host.
///
/// Positions and scroll are absolute; the camera differences them against
/// the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Cursor x in pixels.
    pub mouse_x: f32,
    /// Cursor y in pixels, growing downwards.
    pub mouse_y: f32,
    /// Accumulated scroll (positive = towards the focus).
    pub scroll_y: f32,
    /// Whether the primary (left) button is held.
    pub primary_button: bool,
    /// Whether the pan modifier (shift) is held.
    pub pan_modifier: bool,
}

/// Platform-agnostic input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Primary button pressed or released.
    PrimaryButton {
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel movement (positive = zoom in).
    Scroll {
        /// Scroll amount since the previous event.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Folds [`InputEvent`]s into the running [`InputSnapshot`].
///
/// For hosts that receive discrete window events rather than polling the
/// pointer each frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    snapshot: InputSnapshot,
}

impl InputState {
    /// Idle pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.snapshot.mouse_x = x;
                self.snapshot.mouse_y = y;
            }
            InputEvent::PrimaryButton { pressed } => {
                self.snapshot.primary_button = pressed;
            }
            InputEvent::Scroll { delta } => self.snapshot.scroll_y += delta,
            InputEvent::ModifiersChanged { shift } => {
                self.snapshot.pan_modifier = shift;
            }
        }
    }

    /// Current pointer state.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_accumulate_into_snapshot() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::CursorMoved { x: 12.0, y: 7.0 });
        input.handle_event(InputEvent::PrimaryButton { pressed: true });
        input.handle_event(InputEvent::Scroll { delta: 1.5 });
        input.handle_event(InputEvent::Scroll { delta: -0.5 });
        input.handle_event(InputEvent::ModifiersChanged { shift: true });

        assert_eq!(
            input.snapshot(),
            InputSnapshot {
                mouse_x: 12.0,
                mouse_y: 7.0,
                scroll_y: 1.0,
                primary_button: true,
                pan_modifier: true,
            }
        );

        input.handle_event(InputEvent::PrimaryButton { pressed: false });
        assert!(!input.snapshot().primary_button);
    }
}

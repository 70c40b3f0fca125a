//! Level and edge state for a single button-like control.

/// Press state of one discrete control for the current frame.
///
/// `pressed` is the level ("is it held right now"), `clicked` is the edge
/// ("was it pressed down during this frame"). The edge is not consumed by
/// reading it: every read within a frame sees the same value, and the edge is
/// cleared by [`InputButton::end_frame`] once the frame is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputButton {
    pressed: bool,
    clicked: bool,
}

impl InputButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer/button went down. Sets the level; the edge is raised only on a
    /// released to pressed transition.
    pub fn press(&mut self) {
        if !self.pressed {
            self.clicked = true;
        }
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Sets the level from a polled device value, raising the edge on a rising transition.
    pub fn set_pressed(&mut self, pressed: bool) {
        if pressed {
            self.press();
        } else {
            self.release();
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn has_been_clicked(&self) -> bool {
        self.clicked
    }

    /// Clears the click edge. The level is untouched.
    pub fn end_frame(&mut self) {
        self.clicked = false;
    }
}

//! Header drag tracking
//!
//! Pointer-down on the header records where inside the popup the pointer
//! grabbed it; every move until pointer-up places the popup so that grab
//! point stays under the pointer.

/// Top-left corner of the popup in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Distance from the viewport's left edge
    pub left: i32,
    /// Distance from the viewport's top edge
    pub top: i32,
}

impl Position {
    /// Creates a position
    #[must_use]
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// Drag sub-state, independent of whether the popup is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    grab: Option<(i32, i32)>,
}

impl DragState {
    /// Starts a drag with the pointer at `(x, y)` over a popup at `origin`
    pub fn begin(&mut self, x: i32, y: i32, origin: Position) {
        self.grab = Some((x.saturating_sub(origin.left), y.saturating_sub(origin.top)));
    }

    /// Where the popup goes for a pointer at `(x, y)`, if a drag is active
    #[must_use]
    pub fn track(&self, x: i32, y: i32) -> Option<Position> {
        self.grab
            .map(|(dx, dy)| Position::new(x.saturating_sub(dx), y.saturating_sub(dy)))
    }

    /// Stops the drag
    pub fn end(&mut self) {
        self.grab = None;
    }

    /// Returns true between pointer-down and pointer-up
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }
}

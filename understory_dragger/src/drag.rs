// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag arithmetic: inclusive clamping bounds and anchored drag sessions.
//!
//! ## Usage
//!
//! 1) Describe where the widget's top-left corner may go with [`DragBounds`].
//! 2) On press, start a [`DragSession`] from the pointer position and the widget position.
//! 3) On each move, ask the session for the clamped [`target`](DragSession::target).
//!
//! ## Minimal example
//!
//! ```
//! use understory_dragger::drag::{DragBounds, DragSession};
//! use understory_widget::Position;
//!
//! let bounds = DragBounds::new(0, 0, 100, 100).unwrap();
//! let session = DragSession::start(Position::new(50, 50), Position::new(10, 10));
//!
//! // Pointer moved right by 20.
//! assert_eq!(session.target(Position::new(70, 50), &bounds), Position::new(30, 10));
//! // Far left is pinned at x_min.
//! assert_eq!(session.target(Position::new(-200, 50), &bounds), Position::new(0, 10));
//! ```

use understory_widget::{Error, Position};

/// Inclusive rectangle for a widget's top-left corner.
///
/// Invariant: `x_min <= x_max` and `y_min <= y_max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DragBounds {
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
}

impl DragBounds {
    /// The whole `i32` plane.
    pub const UNBOUNDED: Self = Self {
        x_min: i32::MIN,
        y_min: i32::MIN,
        x_max: i32::MAX,
        y_max: i32::MAX,
    };

    /// Create bounds, rejecting inverted ranges with [`Error::InvalidArgument`].
    pub const fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Result<Self, Error> {
        if x_min > x_max || y_min > y_max {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Lower horizontal bound.
    #[must_use]
    pub const fn x_min(&self) -> i32 {
        self.x_min
    }

    /// Lower vertical bound.
    #[must_use]
    pub const fn y_min(&self) -> i32 {
        self.y_min
    }

    /// Upper horizontal bound.
    #[must_use]
    pub const fn x_max(&self) -> i32 {
        self.x_max
    }

    /// Upper vertical bound.
    #[must_use]
    pub const fn y_max(&self) -> i32 {
        self.y_max
    }

    /// Constrain `p` to the bounds, lower bound first.
    #[must_use]
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            p.x.max(self.x_min).min(self.x_max),
            p.y.max(self.y_min).min(self.y_max),
        )
    }

    /// Returns `true` if `p` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }
}

impl Default for DragBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// State captured at press time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DragSession {
    /// Pointer position at press, in parent-relative coordinates.
    pub anchor: Position,
    /// Widget top-left corner at press.
    pub origin: Position,
}

impl DragSession {
    /// Start a session from the press pointer position and the widget position.
    #[must_use]
    pub const fn start(anchor: Position, origin: Position) -> Self {
        Self { anchor, origin }
    }

    /// Pointer displacement since the press.
    #[must_use]
    pub const fn offset(&self, pointer: Position) -> (i32, i32) {
        (
            pointer.x.saturating_sub(self.anchor.x),
            pointer.y.saturating_sub(self.anchor.y),
        )
    }

    /// Unclamped widget position for `pointer`.
    #[must_use]
    pub const fn candidate(&self, pointer: Position) -> Position {
        let (dx, dy) = self.offset(pointer);
        self.origin.saturating_offset(dx, dy)
    }

    /// Clamped widget position for `pointer`.
    #[must_use]
    pub fn target(&self, pointer: Position, bounds: &DragBounds) -> Position {
        bounds.clamp(self.candidate(pointer))
    }
}

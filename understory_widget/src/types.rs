// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget host: identifiers, positions, frames, and visual state.

use kurbo::Rect;

/// Identifier for a widget in a [`WidgetTree`](crate::WidgetTree).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `WidgetId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WidgetId`.
///
/// Use [`WidgetTree::is_alive`](crate::WidgetTree::is_alive) to check liveness.
/// Stale ids never alias a different live widget because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// An integer position in parent-relative coordinates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// The origin, `(0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn saturating_offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// A widget's rectangle: top-left position plus size, in parent-relative coordinates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Frame {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Frame {
    /// Create a frame.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Returns `true` if `(x, y)` lies inside the half-open rectangle.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        x >= x0 && y >= y0 && x < x0 + i64::from(self.w) && y < y0 + i64::from(self.h)
    }

    /// This frame as a Kurbo rectangle, translated by `origin`.
    #[must_use]
    pub fn to_rect(&self, origin: Position) -> Rect {
        let x0 = f64::from(origin.x) + f64::from(self.x);
        let y0 = f64::from(origin.y) + f64::from(self.y);
        Rect::new(x0, y0, x0 + f64::from(self.w), y0 + f64::from(self.h))
    }
}

/// Visual interaction state of a widget.
///
/// The host stores this per widget and the default paint helper selects
/// colors by it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum WidgetState {
    /// Resting state.
    #[default]
    Normal,
    /// A pointer is pressed on the widget.
    Pressed,
    /// A pointer hovers over the widget.
    Over,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_contains_is_half_open() {
        let f = Frame::new(10, 10, 50, 20);
        assert!(f.contains(10, 10));
        assert!(f.contains(59, 29));
        assert!(!f.contains(60, 10));
        assert!(!f.contains(10, 30));
        assert!(!f.contains(9, 15));
    }

    #[test]
    fn empty_frame_contains_nothing() {
        let f = Frame::new(0, 0, 0, 0);
        assert!(!f.contains(0, 0));
    }

    #[test]
    fn to_rect_applies_origin() {
        let f = Frame::new(5, 6, 10, 20);
        let r = f.to_rect(Position::new(100, 200));
        assert_eq!(r, Rect::new(105.0, 206.0, 115.0, 226.0));
    }

    #[test]
    fn saturating_offset_does_not_wrap() {
        let p = Position::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(p.saturating_offset(10, -10), Position::new(i32::MAX, i32::MIN));
    }
}

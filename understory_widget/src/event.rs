// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by widgets and semantic events produced by them.

use crate::types::{Position, WidgetId};

/// Pointer payload, in the receiving widget's parent-relative coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl PointerEvent {
    /// Create a pointer payload.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The pointer coordinates as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Input delivered to a widget by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A pointer button was pressed.
    PointerDown(PointerEvent),
    /// A pointer button was released.
    PointerUp(PointerEvent),
    /// The pointer moved.
    PointerMove(PointerEvent),
    /// The pointer entered the widget.
    PointerEnter(PointerEvent),
    /// The pointer left the widget.
    PointerLeave(PointerEvent),
    /// A wheel step.
    Wheel {
        /// Vertical wheel delta in steps.
        dy: i32,
    },
    /// A key press, routed by whatever focus policy the embedder uses.
    Key {
        /// Embedder-defined key code.
        code: u32,
    },
}

impl InputEvent {
    /// The pointer payload, if this is a pointer event.
    #[must_use]
    pub const fn pointer(&self) -> Option<PointerEvent> {
        match *self {
            Self::PointerDown(p)
            | Self::PointerUp(p)
            | Self::PointerMove(p)
            | Self::PointerEnter(p)
            | Self::PointerLeave(p) => Some(p),
            Self::Wheel { .. } | Self::Key { .. } => None,
        }
    }
}

/// Whether a handler consumed an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Not consumed; the host may offer the event elsewhere.
    Continue,
    /// Consumed.
    Consumed,
}

/// Kind of a semantic widget event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetEventKind {
    /// A drag began.
    DragStart,
    /// The widget moved during a drag.
    Drag,
    /// A drag ended.
    DragEnd,
}

/// A semantic event emitted by a widget and fanned out to its listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetEvent {
    /// What happened.
    pub kind: WidgetEventKind,
    /// Widget that emitted the event.
    pub target: WidgetId,
    /// The target's position when the event was emitted.
    pub position: Position,
}

/// Handle for a registered listener, used with [`WidgetTree::off`](crate::WidgetTree::off).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

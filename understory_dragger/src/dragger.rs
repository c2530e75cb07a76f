// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dragger widget.

use understory_widget::{
    Error, Frame, InputEvent, Outcome, PointerEvent, Value, Widget, WidgetCx, WidgetEventKind,
    WidgetId, WidgetState, WidgetTree,
};

use crate::drag::{DragBounds, DragSession};

/// Property names for the four bounds.
pub mod props {
    /// Lower horizontal bound.
    pub const X_MIN: &str = "x_min";
    /// Lower vertical bound.
    pub const Y_MIN: &str = "y_min";
    /// Upper horizontal bound.
    pub const X_MAX: &str = "x_max";
    /// Upper vertical bound.
    pub const Y_MAX: &str = "y_max";
}

/// A widget the user presses and drags within [`DragBounds`].
///
/// While dragging, the widget's top-left corner follows the pointer offset
/// since the press, clamped to the bounds. It emits
/// [`DragStart`](WidgetEventKind::DragStart) on press,
/// [`Drag`](WidgetEventKind::Drag) whenever the clamped position changes, and
/// [`DragEnd`](WidgetEventKind::DragEnd) on release. The parent's grab is held
/// for the duration, so moves outside the widget still arrive.
#[derive(Clone, Debug, Default)]
pub struct Dragger {
    bounds: DragBounds,
    session: Option<DragSession>,
}

impl Dragger {
    /// Type name reported by [`Widget::type_name`].
    pub const TYPE_NAME: &'static str = "dragger";

    /// An idle dragger with unbounded range.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle dragger with the given range.
    pub fn with_range(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Result<Self, Error> {
        Ok(Self {
            bounds: DragBounds::new(x_min, y_min, x_max, y_max)?,
            session: None,
        })
    }

    /// Insert an idle, unbounded dragger under `parent`.
    pub fn create(
        tree: &mut WidgetTree,
        parent: WidgetId,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    ) -> Result<WidgetId, Error> {
        let id = tree.insert(parent, Self::new(), Frame::new(x, y, w, h))?;
        tree.set_state(id, WidgetState::Normal)?;
        Ok(id)
    }

    /// Replace the range.
    ///
    /// Fails with [`Error::InvalidArgument`] if either axis is inverted, leaving
    /// the range unchanged. The current position is not re-clamped.
    pub fn set_range(
        &mut self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<(), Error> {
        self.bounds = DragBounds::new(x_min, y_min, x_max, y_max)?;
        Ok(())
    }

    /// Current range.
    #[must_use]
    pub fn range(&self) -> DragBounds {
        self.bounds
    }

    /// Returns `true` between a press and its release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Anchor and saved position of the drag in progress.
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Move to the clamped target for `pointer`, emitting `Drag` only on change.
    fn follow(
        &self,
        cx: &mut WidgetCx<'_>,
        session: &DragSession,
        pointer: PointerEvent,
    ) -> Result<(), Error> {
        let target = session.target(pointer.position(), &self.bounds);
        if cx.move_to(target)? {
            tracing::trace!(widget = ?cx.id(), x = target.x, y = target.y, "drag");
            cx.dispatch(WidgetEventKind::Drag)?;
        }
        Ok(())
    }

    fn press(&mut self, cx: &mut WidgetCx<'_>, pointer: PointerEvent) -> Result<(), Error> {
        cx.check_grab()?;
        cx.dispatch(WidgetEventKind::DragStart)?;
        cx.set_state(WidgetState::Pressed)?;
        cx.grab()?;

        let session = DragSession::start(pointer.position(), cx.position()?);
        tracing::debug!(
            widget = ?cx.id(),
            x = session.origin.x,
            y = session.origin.y,
            "drag start"
        );
        self.follow(cx, &session, pointer)?;
        self.session = Some(session);
        Ok(())
    }

    fn finish(&mut self, cx: &mut WidgetCx<'_>) -> Result<(), Error> {
        cx.dispatch(WidgetEventKind::DragEnd)?;
        cx.set_state(WidgetState::Normal)?;
        self.session = None;
        tracing::debug!(widget = ?cx.id(), "drag end");
        cx.ungrab()
    }
}

impl Widget for Dragger {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn handle_event(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &InputEvent,
    ) -> Result<Outcome, Error> {
        match *event {
            InputEvent::PointerDown(p) => {
                if self.session.is_some() {
                    // A second press without a release ends the first drag.
                    self.finish(cx)?;
                }
                self.press(cx, p)?;
                Ok(Outcome::Consumed)
            }
            InputEvent::PointerMove(p) => match self.session {
                Some(session) => {
                    self.follow(cx, &session, p)?;
                    Ok(Outcome::Consumed)
                }
                None => Ok(Outcome::Continue),
            },
            InputEvent::PointerUp(p) => match self.session {
                Some(session) => {
                    self.follow(cx, &session, p)?;
                    self.finish(cx)?;
                    Ok(Outcome::Consumed)
                }
                None => Ok(Outcome::Continue),
            },
            InputEvent::PointerLeave(_) => {
                cx.set_state(WidgetState::Normal)?;
                Ok(Outcome::Consumed)
            }
            InputEvent::PointerEnter(_) => {
                cx.set_state(WidgetState::Over)?;
                Ok(Outcome::Consumed)
            }
            InputEvent::Wheel { .. } | InputEvent::Key { .. } => Ok(Outcome::Continue),
        }
    }

    fn get_property(&self, name: &str) -> Result<Value, Error> {
        let b = &self.bounds;
        let v = match name {
            props::X_MIN => b.x_min(),
            props::Y_MIN => b.y_min(),
            props::X_MAX => b.x_max(),
            props::Y_MAX => b.y_max(),
            _ => return Err(Error::NotFound),
        };
        Ok(Value::Int(v))
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), Error> {
        let b = self.bounds;
        let (mut x_min, mut y_min, mut x_max, mut y_max) =
            (b.x_min(), b.y_min(), b.x_max(), b.y_max());
        let field = match name {
            props::X_MIN => &mut x_min,
            props::Y_MIN => &mut y_min,
            props::X_MAX => &mut x_max,
            props::Y_MAX => &mut y_max,
            _ => return Err(Error::NotFound),
        };
        *field = value.to_int()?;
        self.bounds = DragBounds::new(x_min, y_min, x_max, y_max)?;
        Ok(())
    }
}

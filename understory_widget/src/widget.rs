// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget capability trait and the plain container variant.

use core::any::Any;
use core::fmt;

use crate::error::Error;
use crate::event::{InputEvent, Outcome};
use crate::paint::{Canvas, PaintCx, paint_helper};
use crate::tree::WidgetCx;
use crate::value::Value;

/// Behavior of one widget kind.
///
/// The host stores one boxed implementation per widget and calls into it for
/// painting, input, and property access. Every method has a default, so a
/// variant only overrides what it needs.
pub trait Widget: Any + fmt::Debug {
    /// Stable name of the widget kind, e.g. `"group"`.
    fn type_name(&self) -> &'static str;

    /// Paint the widget itself. Children are painted by the host afterwards.
    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        paint_helper(cx, canvas);
    }

    /// Handle an input event delivered by the host.
    ///
    /// Return [`Outcome::Continue`] for events this widget does not consume.
    fn handle_event(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &InputEvent,
    ) -> Result<Outcome, Error> {
        Ok(Outcome::Continue)
    }

    /// Read a variant-specific property.
    ///
    /// Return [`Error::NotFound`] for unknown names so the host can fall back
    /// to the base properties.
    fn get_property(&self, _name: &str) -> Result<Value, Error> {
        Err(Error::NotFound)
    }

    /// Write a variant-specific property.
    ///
    /// Return [`Error::NotFound`] for unknown names so the host can fall back
    /// to the base properties.
    fn set_property(&mut self, _name: &str, _value: &Value) -> Result<(), Error> {
        Err(Error::NotFound)
    }
}

/// A plain container: paints its own background and holds children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Group;

impl Group {
    /// Type name reported by [`Widget::type_name`].
    pub const TYPE_NAME: &'static str = "group";
}

impl Widget for Group {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }
}

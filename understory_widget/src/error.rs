// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the host and widget variants.

use core::fmt;

use crate::types::WidgetId;

/// Errors reported by [`WidgetTree`](crate::WidgetTree) operations and widget handlers.
///
/// All errors are local and recoverable; nothing here is retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An argument violated a precondition (inverted range, non-integer value, and so on).
    InvalidArgument,
    /// The property name is not recognized by this handler.
    ///
    /// Property chains treat this as "try the next handler".
    NotFound,
    /// The id does not refer to a live widget.
    StaleWidget(WidgetId),
    /// The widget has no parent to grab.
    NoParent(WidgetId),
    /// The parent's grab slot is already held.
    GrabConflict {
        /// Container whose slot was requested.
        parent: WidgetId,
        /// Current holder of the slot.
        holder: WidgetId,
    },
    /// The parent's grab slot is not held by this widget.
    NotGrabbed {
        /// Container whose slot was released.
        parent: WidgetId,
        /// Widget that attempted the release.
        widget: WidgetId,
    },
    /// The widget's behavior is currently handling an event.
    Busy(WidgetId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::NotFound => f.write_str("not found"),
            Self::StaleWidget(id) => write!(f, "widget {id:?} is not alive"),
            Self::NoParent(id) => write!(f, "widget {id:?} has no parent"),
            Self::GrabConflict { parent, holder } => {
                write!(f, "grab on {parent:?} is already held by {holder:?}")
            }
            Self::NotGrabbed { parent, widget } => {
                write!(f, "grab on {parent:?} is not held by {widget:?}")
            }
            Self::Busy(id) => write!(f, "widget {id:?} is busy handling an event"),
        }
    }
}

impl core::error::Error for Error {}

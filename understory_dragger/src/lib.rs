// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dragger --heading-base-level=0

//! Understory Dragger: a widget that the user presses and drags within bounds.
//!
//! ## Overview
//!
//! [`Dragger`] is a leaf widget for `understory_widget`. It turns a
//! press → move → release pointer sequence into constrained repositioning of
//! itself, plus three notifications through the host's listener fan-out:
//!
//! - `DragStart` on press,
//! - `Drag` each time the clamped position actually changes,
//! - `DragEnd` on release.
//!
//! Positions follow the pointer offset since the press:
//! `position = clamp(saved + (pointer - anchor), bounds)`, where the bounds are an
//! inclusive rectangle for the widget's top-left corner ([`DragBounds`]). The
//! same step runs at press (zero offset), on every move, and at release, so a
//! widget that starts outside its bounds snaps into them as soon as it is pressed.
//!
//! While a drag is active the dragger holds its parent's grab, so pointer events
//! keep arriving after the pointer leaves the widget. Pointer enter/leave only
//! change the visual state.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_dragger::Dragger;
//! use understory_widget::{Frame, Group, InputEvent, PointerEvent, Position, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.insert_root(Group, Frame::new(0, 0, 200, 200));
//! let handle = Dragger::create(&mut tree, root, 10, 10, 20, 20).unwrap();
//! tree.widget_mut::<Dragger>(handle)
//!     .unwrap()
//!     .set_range(0, 0, 100, 100)
//!     .unwrap();
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let sink = events.clone();
//! tree.on_any(handle, move |e| sink.borrow_mut().push((e.kind, e.position)))
//!     .unwrap();
//!
//! let at = |x, y| PointerEvent::new(x, y);
//! tree.route_pointer(root, &InputEvent::PointerDown(at(15, 15))).unwrap();
//! tree.route_pointer(root, &InputEvent::PointerMove(at(500, 15))).unwrap();
//! tree.route_pointer(root, &InputEvent::PointerUp(at(500, 15))).unwrap();
//!
//! assert_eq!(tree.position(handle).unwrap(), Position::new(100, 10));
//! assert_eq!(events.borrow().len(), 3); // DragStart, Drag, DragEnd
//! ```
//!
//! ## Properties
//!
//! The bounds are also reachable through the string-keyed property chain as
//! `x_min`, `y_min`, `x_max`, and `y_max` (see [`props`]). Writes that would
//! invert an axis are rejected, just like [`Dragger::set_range`].
//!
//! ## Features
//!
//! - `std` (default): forwards to `understory_widget/std`.
//! - `libm`: forwards to `understory_widget/libm` for `no_std` builds.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
mod dragger;

pub use drag::{DragBounds, DragSession};
pub use dragger::{Dragger, props};

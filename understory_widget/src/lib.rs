// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widget --heading-base-level=0

//! Understory Widget: a minimal retained widget host.
//!
//! This crate is the host side of leaf widgets such as `understory_dragger`.
//! It stores widgets, routes pointer input to them, fans their semantic events
//! out to listeners, and paints them through an embedder-supplied [`Canvas`].
//!
//! ## API overview
//!
//! - [`WidgetTree`]: generational arena of widgets with non-owning parent links.
//! - [`Widget`]: the capability set of a widget kind (`paint`, `handle_event`,
//!   `get_property`, `set_property`). Each kind is one implementation, stored boxed.
//! - [`WidgetCx`]: what a widget may do to the host while handling an event:
//!   move itself, change its visual state, emit events, and grab its parent.
//! - [`InputEvent`] in, [`WidgetEvent`] out.
//! - [`Value`] and the string-keyed property chain: the widget kind is asked
//!   first, and [`Error::NotFound`] falls through to the base frame properties
//!   (`x`, `y`, `w`, `h`).
//!
//! ## Grabs
//!
//! Each container has one grab slot. While a child holds it,
//! [`WidgetTree::route_pointer`] delivers every pointer event on that container
//! to the child, regardless of position. Acquiring a held slot or releasing a
//! slot held by someone else is an error; the host never silently overwrites it.
//!
//! ## Example
//!
//! ```
//! use understory_widget::{Frame, Group, WidgetEventKind, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.insert_root(Group, Frame::new(0, 0, 200, 100));
//! let child = tree.insert(root, Group, Frame::new(10, 10, 50, 20)).unwrap();
//!
//! tree.on(child, WidgetEventKind::Drag, |e| {
//!     assert_eq!(e.position.x, 10);
//! })
//! .unwrap();
//!
//! assert_eq!(tree.children(root).unwrap(), &[child]);
//! assert_eq!(tree.get_property(child, "w").unwrap().to_int(), Ok(50));
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo, Peniko, and `tracing` against `std`.
//! - `libm`: `no_std` numerics for Kurbo and Peniko.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod event;
mod paint;
mod tree;
mod types;
mod value;
mod widget;

pub use error::Error;
pub use event::{
    InputEvent, ListenerId, Outcome, PointerEvent, WidgetEvent, WidgetEventKind,
};
pub use paint::{Canvas, PaintCx, Style, StyleSet, paint_helper};
pub use tree::{WidgetCx, WidgetTree};
pub use types::{Frame, Position, WidgetId, WidgetState};
pub use value::{Value, names};
pub use widget::{Group, Widget};

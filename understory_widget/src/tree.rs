// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget arena: storage, listeners, grabs, routing, properties, and painting.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use smallvec::SmallVec;

use crate::error::Error;
use crate::event::{InputEvent, ListenerId, Outcome, PointerEvent, WidgetEvent, WidgetEventKind};
use crate::paint::{Canvas, PaintCx, StyleSet};
use crate::types::{Frame, Position, WidgetId, WidgetState};
use crate::value::{Value, names};
use crate::widget::Widget;

type Handler = Box<dyn FnMut(&WidgetEvent)>;

struct Listener {
    id: ListenerId,
    kind: Option<WidgetEventKind>,
    handler: Handler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    frame: Frame,
    state: WidgetState,
    style: StyleSet,
    /// Child that receives all routed pointer input, if any.
    grab: Option<WidgetId>,
    /// Child last hit by routed pointer input.
    hover: Option<WidgetId>,
    listeners: SmallVec<[Listener; 2]>,
    /// `None` while lent to [`WidgetTree::send_event`].
    behavior: Option<Box<dyn Widget>>,
    type_name: &'static str,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of widgets with non-owning parent links.
///
/// Widgets are addressed by generational [`WidgetId`]s. Each widget owns a
/// frame, a visual state, a style set, its listeners, and a boxed [`Widget`]
/// behavior. Containers additionally own a grab slot and a hover slot used by
/// [`WidgetTree::route_pointer`].
#[derive(Debug, Default)]
pub struct WidgetTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_listener: u32,
}

impl WidgetTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: WidgetId) -> Result<&Node, Error> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::StaleWidget(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node, Error> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::StaleWidget(id))
    }

    fn alloc(&mut self, node: Node) -> WidgetId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            WidgetId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "more than u32::MAX widgets is not supported"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            WidgetId::new(idx, 1)
        }
    }

    fn make_node(parent: Option<WidgetId>, behavior: Box<dyn Widget>, frame: Frame) -> Node {
        Node {
            parent,
            children: Vec::new(),
            frame,
            state: WidgetState::Normal,
            style: StyleSet::default(),
            grab: None,
            hover: None,
            listeners: SmallVec::new(),
            type_name: behavior.type_name(),
            behavior: Some(behavior),
        }
    }

    /// Insert a widget without a parent.
    pub fn insert_root(&mut self, widget: impl Widget, frame: Frame) -> WidgetId {
        self.alloc(Self::make_node(None, Box::new(widget), frame))
    }

    /// Insert a widget as the last (topmost) child of `parent`.
    pub fn insert(
        &mut self,
        parent: WidgetId,
        widget: impl Widget,
        frame: Frame,
    ) -> Result<WidgetId, Error> {
        self.node(parent)?;
        let id = self.alloc(Self::make_node(Some(parent), Box::new(widget), frame));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Grab and hover slots on the parent that refer to the widget are cleared.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), Error> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            let p = self.node_mut(parent)?;
            p.children.retain(|c| *c != id);
            if p.grab == Some(id) {
                tracing::debug!(?parent, widget = ?id, "grab released by removal");
                p.grab = None;
            }
            if p.hover == Some(id) {
                p.hover = None;
            }
        }

        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.idx()];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "slot indices originate from u32"
                )]
                let idx = current.idx() as u32;
                self.free.push(idx);
            }
        }
        tracing::debug!(widget = ?id, "removed");
        Ok(())
    }

    /// Returns `true` if `id` refers to a live widget.
    #[must_use]
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.node(id).is_ok()
    }

    /// Parent of a widget, or `None` for roots.
    pub fn parent(&self, id: WidgetId) -> Result<Option<WidgetId>, Error> {
        Ok(self.node(id)?.parent)
    }

    /// Children of a widget, bottom to top.
    pub fn children(&self, id: WidgetId) -> Result<&[WidgetId], Error> {
        Ok(&self.node(id)?.children)
    }

    /// Type name of the widget's behavior.
    pub fn type_name(&self, id: WidgetId) -> Result<&'static str, Error> {
        Ok(self.node(id)?.type_name)
    }

    /// Frame in parent-relative coordinates.
    pub fn frame(&self, id: WidgetId) -> Result<Frame, Error> {
        Ok(self.node(id)?.frame)
    }

    /// Top-left corner in parent-relative coordinates.
    pub fn position(&self, id: WidgetId) -> Result<Position, Error> {
        Ok(self.node(id)?.frame.position())
    }

    /// Move a widget's top-left corner, returning whether it changed.
    pub fn move_to(&mut self, id: WidgetId, position: Position) -> Result<bool, Error> {
        let frame = &mut self.node_mut(id)?.frame;
        if frame.position() == position {
            return Ok(false);
        }
        frame.x = position.x;
        frame.y = position.y;
        Ok(true)
    }

    /// Replace a widget's frame.
    pub fn move_resize(&mut self, id: WidgetId, frame: Frame) -> Result<(), Error> {
        self.node_mut(id)?.frame = frame;
        Ok(())
    }

    /// Visual state.
    pub fn state(&self, id: WidgetId) -> Result<WidgetState, Error> {
        Ok(self.node(id)?.state)
    }

    /// Set the visual state.
    pub fn set_state(&mut self, id: WidgetId, state: WidgetState) -> Result<(), Error> {
        self.node_mut(id)?.state = state;
        Ok(())
    }

    /// Style set used by the default paint helper.
    pub fn style(&self, id: WidgetId) -> Result<&StyleSet, Error> {
        Ok(&self.node(id)?.style)
    }

    /// Replace the style set.
    pub fn set_style(&mut self, id: WidgetId, style: StyleSet) -> Result<(), Error> {
        self.node_mut(id)?.style = style;
        Ok(())
    }

    /// Borrow a widget's behavior as a concrete type.
    ///
    /// Returns `None` for stale ids, mismatched types, or a behavior that is
    /// currently handling an event.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let behavior: &dyn Any = self.node(id).ok()?.behavior.as_deref()?;
        behavior.downcast_ref()
    }

    /// Mutably borrow a widget's behavior as a concrete type.
    #[must_use]
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let behavior: &mut dyn Any = self.node_mut(id).ok()?.behavior.as_deref_mut()?;
        behavior.downcast_mut()
    }

    fn add_listener(
        &mut self,
        id: WidgetId,
        kind: Option<WidgetEventKind>,
        handler: Handler,
    ) -> Result<ListenerId, Error> {
        let listener = ListenerId(self.next_listener);
        self.node_mut(id)?.listeners.push(Listener {
            id: listener,
            kind,
            handler,
        });
        self.next_listener = self.next_listener.wrapping_add(1);
        Ok(listener)
    }

    /// Register a listener for one kind of event emitted by `id`.
    pub fn on(
        &mut self,
        id: WidgetId,
        kind: WidgetEventKind,
        handler: impl FnMut(&WidgetEvent) + 'static,
    ) -> Result<ListenerId, Error> {
        self.add_listener(id, Some(kind), Box::new(handler))
    }

    /// Register a listener for every event emitted by `id`.
    pub fn on_any(
        &mut self,
        id: WidgetId,
        handler: impl FnMut(&WidgetEvent) + 'static,
    ) -> Result<ListenerId, Error> {
        self.add_listener(id, None, Box::new(handler))
    }

    /// Remove a listener, returning whether it was registered on `id`.
    pub fn off(&mut self, id: WidgetId, listener: ListenerId) -> Result<bool, Error> {
        let listeners = &mut self.node_mut(id)?.listeners;
        let before = listeners.len();
        listeners.retain(|l| l.id != listener);
        Ok(listeners.len() != before)
    }

    /// Fan an event out to the target's listeners, in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, event: &WidgetEvent) -> Result<usize, Error> {
        let node = self.node_mut(event.target)?;
        let mut count = 0;
        for listener in node
            .listeners
            .iter_mut()
            .filter(|l| l.kind.is_none_or(|k| k == event.kind))
        {
            (listener.handler)(event);
            count += 1;
        }
        tracing::trace!(target_widget = ?event.target, kind = ?event.kind, count, "dispatched");
        Ok(count)
    }

    /// Direct all routed pointer input on `parent` to `child`.
    ///
    /// Fails with [`Error::GrabConflict`] if the slot is already held, including
    /// by `child` itself.
    pub fn grab(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), Error> {
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::InvalidArgument);
        }
        let node = self.node_mut(parent)?;
        if let Some(holder) = node.grab {
            return Err(Error::GrabConflict { parent, holder });
        }
        node.grab = Some(child);
        tracing::debug!(?parent, widget = ?child, "grab acquired");
        Ok(())
    }

    /// Release a grab held by `child`.
    pub fn ungrab(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), Error> {
        let node = self.node_mut(parent)?;
        if node.grab != Some(child) {
            return Err(Error::NotGrabbed {
                parent,
                widget: child,
            });
        }
        node.grab = None;
        tracing::debug!(?parent, widget = ?child, "grab released");
        Ok(())
    }

    /// Current holder of the grab slot on `parent`.
    pub fn grabbed(&self, parent: WidgetId) -> Result<Option<WidgetId>, Error> {
        Ok(self.node(parent)?.grab)
    }

    /// Deliver an input event to one widget.
    pub fn send_event(&mut self, id: WidgetId, event: &InputEvent) -> Result<Outcome, Error> {
        let mut behavior = self.node_mut(id)?.behavior.take().ok_or(Error::Busy(id))?;
        let result = {
            let mut cx = WidgetCx { tree: self, id };
            behavior.handle_event(&mut cx, event)
        };
        if let Ok(node) = self.node_mut(id) {
            node.behavior = Some(behavior);
        }
        result
    }

    fn hit_child(&self, container: WidgetId, x: i32, y: i32) -> Result<Option<WidgetId>, Error> {
        let node = self.node(container)?;
        for &child in node.children.iter().rev() {
            if self.node(child)?.frame.contains(x, y) {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn update_hover(
        &mut self,
        container: WidgetId,
        hit: Option<WidgetId>,
        at: PointerEvent,
    ) -> Result<(), Error> {
        let node = self.node_mut(container)?;
        let previous = node.hover;
        if previous == hit {
            return Ok(());
        }
        node.hover = hit;
        if let Some(previous) = previous
            && self.is_alive(previous)
        {
            self.send_event(previous, &InputEvent::PointerLeave(at))?;
        }
        if let Some(hit) = hit {
            self.send_event(hit, &InputEvent::PointerEnter(at))?;
        }
        Ok(())
    }

    /// Route a pointer event, given in `container`'s child coordinates, to one child.
    ///
    /// If a child holds the container's grab, it receives the event regardless of
    /// position. Otherwise the topmost child containing the point is hit, and
    /// `PointerLeave`/`PointerEnter` are delivered when the hit child changes.
    /// A `PointerLeave` addressed to the container clears its hover slot.
    /// Non-pointer events are not routed.
    pub fn route_pointer(
        &mut self,
        container: WidgetId,
        event: &InputEvent,
    ) -> Result<Outcome, Error> {
        let Some(at) = event.pointer() else {
            return Ok(Outcome::Continue);
        };
        if let Some(holder) = self.node(container)?.grab {
            return self.send_event(holder, event);
        }
        match event {
            InputEvent::PointerLeave(_) => {
                self.update_hover(container, None, at)?;
                Ok(Outcome::Continue)
            }
            InputEvent::PointerEnter(_) => {
                let hit = self.hit_child(container, at.x, at.y)?;
                self.update_hover(container, hit, at)?;
                Ok(Outcome::Continue)
            }
            _ => {
                let hit = self.hit_child(container, at.x, at.y)?;
                self.update_hover(container, hit, at)?;
                match hit {
                    Some(target) => self.send_event(target, event),
                    None => Ok(Outcome::Continue),
                }
            }
        }
    }

    /// Read a property, trying the widget variant before the base frame properties.
    pub fn get_property(&self, id: WidgetId, name: &str) -> Result<Value, Error> {
        let node = self.node(id)?;
        let behavior = node.behavior.as_ref().ok_or(Error::Busy(id))?;
        match behavior.get_property(name) {
            Err(Error::NotFound) => base_property(&node.frame, name),
            other => other,
        }
    }

    /// Write a property, trying the widget variant before the base frame properties.
    pub fn set_property(&mut self, id: WidgetId, name: &str, value: &Value) -> Result<(), Error> {
        let node = self.node_mut(id)?;
        let behavior = node.behavior.as_mut().ok_or(Error::Busy(id))?;
        match behavior.set_property(name, value) {
            Err(Error::NotFound) => set_base_property(&mut node.frame, name, value),
            other => other,
        }
    }

    fn origin_of(&self, id: WidgetId) -> Result<Position, Error> {
        let mut origin = Position::ZERO;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            let node = self.node(parent)?;
            origin = origin.saturating_offset(node.frame.x, node.frame.y);
            current = node.parent;
        }
        Ok(origin)
    }

    /// Paint `id` and its subtree, depth-first, children after their parent.
    pub fn paint(&self, id: WidgetId, canvas: &mut dyn Canvas) -> Result<(), Error> {
        let origin = self.origin_of(id)?;
        self.paint_node(id, origin, canvas)
    }

    fn paint_node(
        &self,
        id: WidgetId,
        origin: Position,
        canvas: &mut dyn Canvas,
    ) -> Result<(), Error> {
        let node = self.node(id)?;
        let cx = PaintCx {
            id,
            rect: node.frame.to_rect(origin),
            state: node.state,
            style: &node.style,
        };
        if let Some(behavior) = node.behavior.as_ref() {
            behavior.paint(&cx, canvas);
        }
        let child_origin = origin.saturating_offset(node.frame.x, node.frame.y);
        for &child in &node.children {
            self.paint_node(child, child_origin, canvas)?;
        }
        Ok(())
    }
}

fn base_property(frame: &Frame, name: &str) -> Result<Value, Error> {
    let size = |v: u32| i32::try_from(v).map(Value::Int).map_err(|_| Error::InvalidArgument);
    match name {
        names::X => Ok(Value::Int(frame.x)),
        names::Y => Ok(Value::Int(frame.y)),
        names::W => size(frame.w),
        names::H => size(frame.h),
        _ => Err(Error::NotFound),
    }
}

fn set_base_property(frame: &mut Frame, name: &str, value: &Value) -> Result<(), Error> {
    let size = |v: &Value| -> Result<u32, Error> {
        u32::try_from(v.to_int()?).map_err(|_| Error::InvalidArgument)
    };
    match name {
        names::X => frame.x = value.to_int()?,
        names::Y => frame.y = value.to_int()?,
        names::W => frame.w = size(value)?,
        names::H => frame.h = size(value)?,
        _ => return Err(Error::NotFound),
    }
    Ok(())
}

/// Host access for a widget while it handles an event.
///
/// All operations act on the widget being handled, or on its parent for grabs.
#[derive(Debug)]
pub struct WidgetCx<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl WidgetCx<'_> {
    /// Widget being handled.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Parent of the widget being handled.
    pub fn parent(&self) -> Result<Option<WidgetId>, Error> {
        self.tree.parent(self.id)
    }

    /// Current frame.
    pub fn frame(&self) -> Result<Frame, Error> {
        self.tree.frame(self.id)
    }

    /// Current top-left corner.
    pub fn position(&self) -> Result<Position, Error> {
        self.tree.position(self.id)
    }

    /// Move the widget, returning whether its position changed.
    pub fn move_to(&mut self, position: Position) -> Result<bool, Error> {
        self.tree.move_to(self.id, position)
    }

    /// Current visual state.
    pub fn state(&self) -> Result<WidgetState, Error> {
        self.tree.state(self.id)
    }

    /// Set the visual state.
    pub fn set_state(&mut self, state: WidgetState) -> Result<(), Error> {
        self.tree.set_state(self.id, state)
    }

    /// Emit `kind` from this widget, stamped with its current position.
    pub fn dispatch(&mut self, kind: WidgetEventKind) -> Result<usize, Error> {
        let event = WidgetEvent {
            kind,
            target: self.id,
            position: self.position()?,
        };
        self.tree.dispatch(&event)
    }

    fn require_parent(&self) -> Result<WidgetId, Error> {
        self.parent()?.ok_or(Error::NoParent(self.id))
    }

    /// Check, without side effects, that [`grab`](Self::grab) would succeed.
    pub fn check_grab(&self) -> Result<(), Error> {
        let parent = self.require_parent()?;
        match self.tree.grabbed(parent)? {
            Some(holder) => Err(Error::GrabConflict { parent, holder }),
            None => Ok(()),
        }
    }

    /// Grab the parent's pointer routing for this widget.
    pub fn grab(&mut self) -> Result<(), Error> {
        let parent = self.require_parent()?;
        self.tree.grab(parent, self.id)
    }

    /// Release the parent's grab held by this widget.
    pub fn ungrab(&mut self) -> Result<(), Error> {
        let parent = self.require_parent()?;
        self.tree.ungrab(parent, self.id)
    }
}

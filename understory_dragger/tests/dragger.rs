// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_dragger` crate.
//!
//! These drive a dragger inside a `WidgetTree` with routed pointer input and
//! check its position, the events it emits, its visual state, and how it uses
//! the parent's grab.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use peniko::Color;
use understory_dragger::{DragBounds, Dragger, props};
use understory_widget::{
    Canvas, Error, Frame, Group, InputEvent, Outcome, PointerEvent, Position, Style, StyleSet,
    Value, WidgetEvent, WidgetEventKind, WidgetId, WidgetState, WidgetTree,
};
use understory_widget::WidgetEventKind::{Drag, DragEnd, DragStart};

type Events = Rc<RefCell<Vec<WidgetEvent>>>;

struct Fixture {
    tree: WidgetTree,
    root: WidgetId,
    dragger: WidgetId,
    events: Events,
}

impl Fixture {
    /// A 200×200 root with a 50×50 dragger at `(x, y)`.
    fn new(x: i32, y: i32) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Group, Frame::new(0, 0, 200, 200));
        let dragger = Dragger::create(&mut tree, root, x, y, 50, 50).unwrap();
        let events: Events = Rc::default();
        let sink = events.clone();
        tree.on_any(dragger, move |e| sink.borrow_mut().push(*e))
            .unwrap();
        Self {
            tree,
            root,
            dragger,
            events,
        }
    }

    fn with_range(mut self, x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        self.dragger_mut()
            .set_range(x_min, y_min, x_max, y_max)
            .unwrap();
        self
    }

    fn dragger_mut(&mut self) -> &mut Dragger {
        self.tree.widget_mut::<Dragger>(self.dragger).unwrap()
    }

    fn dragger(&self) -> &Dragger {
        self.tree.widget::<Dragger>(self.dragger).unwrap()
    }

    fn route(&mut self, event: InputEvent) -> Outcome {
        self.tree.route_pointer(self.root, &event).unwrap()
    }

    fn down(&mut self, x: i32, y: i32) -> Outcome {
        self.route(InputEvent::PointerDown(PointerEvent::new(x, y)))
    }

    fn mv(&mut self, x: i32, y: i32) -> Outcome {
        self.route(InputEvent::PointerMove(PointerEvent::new(x, y)))
    }

    fn up(&mut self, x: i32, y: i32) -> Outcome {
        self.route(InputEvent::PointerUp(PointerEvent::new(x, y)))
    }

    fn position(&self) -> Position {
        self.tree.position(self.dragger).unwrap()
    }

    fn state(&self) -> WidgetState {
        self.tree.state(self.dragger).unwrap()
    }

    fn grabbed(&self) -> Option<WidgetId> {
        self.tree.grabbed(self.root).unwrap()
    }

    fn kinds(&self) -> Vec<WidgetEventKind> {
        self.events.borrow().iter().map(|e| e.kind).collect()
    }

    fn take(&self) -> Vec<(WidgetEventKind, Position)> {
        self.events
            .borrow_mut()
            .drain(..)
            .map(|e| (e.kind, e.position))
            .collect()
    }
}

#[test]
fn press_move_release_scenario() {
    let mut f = Fixture::new(10, 10).with_range(0, 0, 100, 100);

    assert_eq!(f.down(50, 50), Outcome::Consumed);
    assert_eq!(f.take(), vec![(DragStart, Position::new(10, 10))]);
    assert_eq!(f.position(), Position::new(10, 10));
    assert_eq!(f.state(), WidgetState::Pressed);
    assert_eq!(f.grabbed(), Some(f.dragger));
    assert!(f.dragger().is_dragging());

    f.mv(70, 50);
    assert_eq!(f.take(), vec![(Drag, Position::new(30, 10))]);

    // Outside the widget and the bounds: grab keeps routing, clamp pins x.
    f.mv(-200, 50);
    assert_eq!(f.take(), vec![(Drag, Position::new(0, 10))]);

    assert_eq!(f.up(-200, 50), Outcome::Consumed);
    assert_eq!(f.take(), vec![(DragEnd, Position::new(0, 10))]);
    assert_eq!(f.position(), Position::new(0, 10));
    assert_eq!(f.state(), WidgetState::Normal);
    assert_eq!(f.grabbed(), None);
    assert!(!f.dragger().is_dragging());
}

#[test]
fn session_records_anchor_and_saved_position() {
    let mut f = Fixture::new(10, 10);
    f.down(30, 40);
    let session = f.dragger().session().unwrap();
    assert_eq!(session.anchor, Position::new(30, 40));
    assert_eq!(session.origin, Position::new(10, 10));
}

#[test]
fn repeated_move_emits_once() {
    let mut f = Fixture::new(10, 10);
    f.down(20, 20);
    f.mv(25, 20);
    f.mv(25, 20);
    f.mv(25, 20);
    assert_eq!(f.kinds(), vec![DragStart, Drag]);
}

#[test]
fn pinned_axis_does_not_spam_drag() {
    let mut f = Fixture::new(10, 10).with_range(0, 10, 100, 10);
    f.down(20, 20);
    f.mv(20, 80);
    f.mv(20, -80);
    assert_eq!(f.kinds(), vec![DragStart]);
    f.mv(40, -80);
    assert_eq!(f.kinds(), vec![DragStart, Drag]);
    assert_eq!(f.position(), Position::new(30, 10));
}

#[test]
fn release_position_is_applied_before_drag_end() {
    let mut f = Fixture::new(10, 10);
    f.down(20, 20);
    f.up(35, 25);
    assert_eq!(
        f.take(),
        vec![
            (DragStart, Position::new(10, 10)),
            (Drag, Position::new(25, 15)),
            (DragEnd, Position::new(25, 15)),
        ]
    );
}

#[test]
fn idle_moves_and_releases_do_nothing() {
    let mut f = Fixture::new(10, 10);
    f.mv(20, 20);
    f.mv(30, 30);
    assert_eq!(f.up(30, 30), Outcome::Continue);
    assert!(f.kinds().is_empty());
    assert_eq!(f.position(), Position::new(10, 10));
    assert_eq!(f.grabbed(), None);
}

#[test]
fn one_start_and_one_end_per_press() {
    let mut f = Fixture::new(10, 10);
    for _ in 0..3 {
        f.down(20, 20);
        f.mv(30, 30);
        f.mv(20, 20);
        f.up(20, 20);
    }
    let kinds = f.kinds();
    let starts = kinds.iter().filter(|k| **k == DragStart).count();
    let ends = kinds.iter().filter(|k| **k == DragEnd).count();
    assert_eq!((starts, ends), (3, 3));

    // Every Drag lies strictly inside a start..end window.
    let mut active = false;
    for k in kinds {
        match k {
            DragStart => active = true,
            DragEnd => active = false,
            Drag => assert!(active, "Drag emitted while idle"),
        }
    }
}

#[test]
fn second_press_ends_previous_drag_first() {
    let mut f = Fixture::new(10, 10);
    f.down(20, 20);
    f.mv(30, 20);
    f.down(40, 20);
    assert_eq!(f.kinds(), vec![DragStart, Drag, DragEnd, DragStart]);
    assert_eq!(f.grabbed(), Some(f.dragger));
    assert_eq!(
        f.dragger().session().unwrap().origin,
        Position::new(20, 10)
    );

    f.up(40, 20);
    assert_eq!(f.grabbed(), None);
}

#[test]
fn press_snaps_out_of_range_widget_into_bounds() {
    let mut f = Fixture::new(150, 150).with_range(0, 0, 100, 100);
    f.down(160, 160);
    assert_eq!(
        f.take(),
        vec![
            (DragStart, Position::new(150, 150)),
            (Drag, Position::new(100, 100)),
        ]
    );
    // The saved position is the pre-snap one.
    assert_eq!(
        f.dragger().session().unwrap().origin,
        Position::new(150, 150)
    );
}

#[test]
fn set_range_does_not_reclamp_immediately() {
    let mut f = Fixture::new(150, 150);
    f.dragger_mut().set_range(0, 0, 100, 100).unwrap();
    assert_eq!(f.position(), Position::new(150, 150));
    assert!(f.kinds().is_empty());
}

#[test]
fn drags_never_leave_valid_bounds() {
    let bounds = [
        (0, 0, 100, 100),
        (-50, 20, 50, 20),
        (30, 30, 30, 30),
        (i32::MIN, 0, i32::MAX, 0),
        (-1000, -1000, 1000, 1000),
    ];
    let path = [
        (0, 0),
        (10, -5),
        (-300, 400),
        (i32::MAX, i32::MIN),
        (i32::MIN, i32::MAX),
        (75, 75),
        (25, 25),
    ];
    for (x_min, y_min, x_max, y_max) in bounds {
        let mut f = Fixture::new(10, 10).with_range(x_min, y_min, x_max, y_max);
        let range = f.dragger().range();
        f.down(20, 20);
        assert!(range.contains(f.position()));
        for (x, y) in path {
            f.mv(x, y);
            assert!(
                range.contains(f.position()),
                "{:?} escaped {range:?}",
                f.position()
            );
        }
        let (x, y) = path[path.len() - 1];
        f.up(x, y);
        assert!(range.contains(f.position()));
        for e in f.events.borrow().iter() {
            assert!(range.contains(e.position) || e.kind == DragStart);
        }
    }
}

#[test]
fn invalid_range_leaves_bounds_intact() {
    let mut f = Fixture::new(10, 10).with_range(1, 2, 3, 4);
    let inverted = [(10, 10, 5, 20), (0, 10, 5, 9), (i32::MAX, 0, i32::MIN, 0)];
    for (x_min, y_min, x_max, y_max) in inverted {
        assert_eq!(
            f.dragger_mut().set_range(x_min, y_min, x_max, y_max),
            Err(Error::InvalidArgument)
        );
        assert_eq!(f.dragger().range(), DragBounds::new(1, 2, 3, 4).unwrap());
    }
}

#[test]
fn properties_through_the_host_chain() {
    let mut f = Fixture::new(10, 10).with_range(0, 0, 100, 100);
    let tree = &mut f.tree;
    let id = f.dragger;

    assert_eq!(tree.get_property(id, props::X_MIN), Ok(Value::Int(0)));
    assert_eq!(tree.get_property(id, props::Y_MAX), Ok(Value::Int(100)));
    // Base properties resolve after the dragger declines.
    assert_eq!(tree.get_property(id, "x"), Ok(Value::Int(10)));
    assert_eq!(tree.get_property(id, "unknown"), Err(Error::NotFound));

    tree.set_property(id, props::X_MAX, &Value::Int(40)).unwrap();
    assert_eq!(tree.get_property(id, props::X_MAX), Ok(Value::Int(40)));
    assert_eq!(
        tree.set_property(id, props::X_MIN, &Value::Int(41)),
        Err(Error::InvalidArgument)
    );
    tree.set_property(id, "y", &Value::Int(33)).unwrap();
    assert_eq!(tree.position(id).unwrap(), Position::new(10, 33));
}

#[test]
fn enter_and_leave_only_change_visual_state() {
    let mut f = Fixture::new(10, 10);
    f.mv(20, 20);
    assert_eq!(f.state(), WidgetState::Over);
    f.mv(190, 190);
    assert_eq!(f.state(), WidgetState::Normal);

    f.mv(20, 20);
    f.down(20, 20);
    f.tree
        .send_event(
            f.dragger,
            &InputEvent::PointerLeave(PointerEvent::new(0, 0)),
        )
        .unwrap();
    assert_eq!(f.state(), WidgetState::Normal);
    assert!(f.dragger().is_dragging());
    assert_eq!(f.grabbed(), Some(f.dragger));
}

#[test]
fn other_events_are_not_consumed() {
    let mut f = Fixture::new(10, 10);
    for event in [InputEvent::Wheel { dy: -1 }, InputEvent::Key { code: 32 }] {
        assert_eq!(
            f.tree.send_event(f.dragger, &event).unwrap(),
            Outcome::Continue
        );
    }
    assert!(f.kinds().is_empty());
}

#[test]
fn press_fails_cleanly_when_grab_is_taken() {
    let mut f = Fixture::new(10, 10);
    let other = f
        .tree
        .insert(f.root, Group, Frame::new(150, 150, 10, 10))
        .unwrap();
    f.tree.grab(f.root, other).unwrap();

    let result = f.tree.send_event(
        f.dragger,
        &InputEvent::PointerDown(PointerEvent::new(20, 20)),
    );
    assert_eq!(
        result,
        Err(Error::GrabConflict {
            parent: f.root,
            holder: other
        })
    );
    assert!(f.kinds().is_empty());
    assert!(!f.dragger().is_dragging());
    assert_eq!(f.state(), WidgetState::Normal);
    assert_eq!(f.grabbed(), Some(other));
}

#[test]
fn root_dragger_cannot_grab() {
    let mut tree = WidgetTree::new();
    let id = tree.insert_root(Dragger::new(), Frame::new(0, 0, 10, 10));
    assert_eq!(
        tree.send_event(id, &InputEvent::PointerDown(PointerEvent::new(1, 1))),
        Err(Error::NoParent(id))
    );
    assert!(!tree.widget::<Dragger>(id).unwrap().is_dragging());
}

#[derive(Default)]
struct Recorder {
    fills: Vec<(Rect, Color)>,
}

impl Canvas for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: f64) {}
}

#[test]
fn paints_with_the_style_of_its_state() {
    let mut f = Fixture::new(10, 10);
    let solid = |c| Style {
        background: Some(c),
        border: None,
        border_width: 0.0,
    };
    let styles = StyleSet {
        normal: solid(Color::WHITE),
        pressed: solid(Color::BLACK),
        over: solid(Color::WHITE),
    };
    f.tree.set_style(f.dragger, styles).unwrap();

    f.down(20, 20);
    f.mv(40, 30);
    let mut canvas = Recorder::default();
    f.tree.paint(f.dragger, &mut canvas).unwrap();
    assert_eq!(
        canvas.fills,
        vec![(Rect::new(30.0, 20.0, 80.0, 70.0), Color::BLACK)]
    );
}

#[test]
fn removing_a_dragging_widget_frees_the_grab() {
    let mut f = Fixture::new(10, 10);
    f.down(20, 20);
    assert_eq!(f.grabbed(), Some(f.dragger));
    f.tree.remove(f.dragger).unwrap();
    assert_eq!(f.grabbed(), None);
    assert_eq!(f.mv(20, 20), Outcome::Continue);
}

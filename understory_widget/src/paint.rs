// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas abstraction and the default self-paint helper.
//!
//! The host does not render anything itself. It walks the tree and hands each
//! widget a [`PaintCx`] with its absolute rectangle and current style; widgets
//! draw into a [`Canvas`] supplied by the embedder.

use kurbo::Rect;
use peniko::Color;

use crate::types::{WidgetId, WidgetState};

/// Drawing sink supplied by the embedder.
pub trait Canvas {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of `rect` with a solid color.
    ///
    /// The stroke is centered on the rectangle's edges.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
}

/// Background and border for one visual state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Style {
    /// Background fill, if any.
    pub background: Option<Color>,
    /// Border color, if any.
    pub border: Option<Color>,
    /// Border width in pixels. Ignored when `border` is `None`.
    pub border_width: f64,
}

impl Style {
    /// A style that paints nothing.
    pub const NONE: Self = Self {
        background: None,
        border: None,
        border_width: 0.0,
    };
}

impl Default for Style {
    fn default() -> Self {
        Self::NONE
    }
}

/// Styles for each [`WidgetState`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleSet {
    /// Used in [`WidgetState::Normal`].
    pub normal: Style,
    /// Used in [`WidgetState::Pressed`].
    pub pressed: Style,
    /// Used in [`WidgetState::Over`].
    pub over: Style,
}

impl StyleSet {
    /// The same style for every state.
    #[must_use]
    pub const fn uniform(style: Style) -> Self {
        Self {
            normal: style,
            pressed: style,
            over: style,
        }
    }

    /// Select the style for `state`.
    #[must_use]
    pub const fn for_state(&self, state: WidgetState) -> &Style {
        match state {
            WidgetState::Normal => &self.normal,
            WidgetState::Pressed => &self.pressed,
            WidgetState::Over => &self.over,
        }
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        let border = Some(Color::from_rgb8(0x8c, 0x8c, 0x8c));
        Self {
            normal: Style {
                background: Some(Color::from_rgb8(0xe0, 0xe0, 0xe0)),
                border,
                border_width: 1.0,
            },
            pressed: Style {
                background: Some(Color::from_rgb8(0xb0, 0xb0, 0xb0)),
                border,
                border_width: 1.0,
            },
            over: Style {
                background: Some(Color::from_rgb8(0xf0, 0xf0, 0xf0)),
                border,
                border_width: 1.0,
            },
        }
    }
}

/// Per-widget paint context.
#[derive(Clone, Debug)]
pub struct PaintCx<'a> {
    pub(crate) id: WidgetId,
    pub(crate) rect: Rect,
    pub(crate) state: WidgetState,
    pub(crate) style: &'a StyleSet,
}

impl PaintCx<'_> {
    /// Widget being painted.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget's rectangle in root coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current visual state.
    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Style for the current visual state.
    #[must_use]
    pub fn style(&self) -> &Style {
        self.style.for_state(self.state)
    }
}

/// Paint background then border for the widget's current state.
///
/// The border is inset by half its width so it stays inside the widget rectangle.
pub fn paint_helper(cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
    let style = cx.style();
    let rect = cx.rect();
    if let Some(background) = style.background {
        canvas.fill_rect(rect, background);
    }
    if let Some(border) = style.border
        && style.border_width > 0.0
    {
        canvas.stroke_rect(rect.inset(-style.border_width / 2.0), border, style.border_width);
    }
}

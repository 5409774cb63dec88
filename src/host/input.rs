use kurbo::Size;

use crate::foundation::core::{Point, Rect};

/// Container and viewport dimensions in CSS px, plus the display pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub container: Size,
    pub viewport: Size,
    pub dpr: f64,
}

impl Layout {
    /// A container that fills the viewport.
    pub fn full(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            container: Size::new(width, height),
            viewport: Size::new(width, height),
            dpr,
        }
    }
}

/// Host events routed to a widget. Pointer positions are relative to the widget's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point },
    PointerMove { pos: Point },
    PointerUp { pos: Point },
    PointerLeave,
    Wheel { delta_y: f64 },
    Resize(Layout),
    /// The widget's rect and the viewport rect, both in page coordinates.
    Intersection { element: Rect, viewport: Rect },
}

/// What the widget did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    Ignored,
    Handled,
    /// Handled, and the host must suppress the default action (e.g. page zoom on wheel).
    PreventDefault,
}

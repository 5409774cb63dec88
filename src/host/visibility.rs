use crate::foundation::core::Rect;

/// Vertical margin added above and below the viewport before testing intersection.
pub const DEFAULT_MARGIN_Y: f64 = 200.0;

/// Tracks whether an element is near enough to the viewport to keep animating.
///
/// Starts visible, like an observer that has not reported yet.
#[derive(Clone, Copy, Debug)]
pub struct ViewportGate {
    margin_y: f64,
    visible: bool,
}

impl Default for ViewportGate {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_Y)
    }
}

impl ViewportGate {
    pub fn new(margin_y: f64) -> Self {
        Self {
            margin_y: margin_y.max(0.0),
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record a new observation. Returns `true` when visibility changed.
    pub fn observe(&mut self, element: Rect, viewport: Rect) -> bool {
        let root = Rect::new(
            viewport.x0,
            viewport.y0 - self.margin_y,
            viewport.x1,
            viewport.y1 + self.margin_y,
        );
        // Edge contact counts as intersecting.
        let now = element.x0 <= root.x1
            && element.x1 >= root.x0
            && element.y0 <= root.y1
            && element.y1 >= root.y0;
        let changed = now != self.visible;
        self.visible = now;
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/visibility.rs"]
mod tests;

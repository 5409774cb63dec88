use std::collections::BTreeMap;

use crate::animation::clock::Clock;
use crate::host::input::{EventDisposition, InputEvent};
use crate::host::view::WidgetView;
use crate::host::widget::{Widget, WidgetMessage};
use crate::render::plan::FramePlan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

/// Single-threaded frame loop over mounted widgets.
///
/// The clock is sampled once per frame so every widget sees the same instant. Unmounted
/// widgets are torn down immediately and never tick again; events and messages addressed to
/// them are dropped.
pub struct FrameScheduler {
    clock: Box<dyn Clock>,
    widgets: BTreeMap<WidgetId, Box<dyn Widget>>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            widgets: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn mount(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        tracing::debug!(widget = widget.name(), id = id.0, "mount");
        self.widgets.insert(id, widget);
        id
    }

    pub fn unmount(&mut self, id: WidgetId) -> bool {
        match self.widgets.remove(&id) {
            Some(mut widget) => {
                widget.teardown();
                tracing::debug!(widget = widget.name(), id = id.0, "unmount");
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn dispatch(&mut self, id: WidgetId, event: InputEvent) -> EventDisposition {
        let now = self.clock.now();
        let Some(widget) = self.widgets.get_mut(&id) else {
            return EventDisposition::Ignored;
        };
        match event {
            InputEvent::Resize(layout) => {
                widget.resize(layout);
                EventDisposition::Handled
            }
            other => widget.handle_input(&other, now),
        }
    }

    /// Hand data to a widget. Returns `false` (and drops the message) if it is not mounted.
    pub fn deliver(&mut self, id: WidgetId, message: WidgetMessage) -> bool {
        match self.widgets.get_mut(&id) {
            Some(widget) => {
                widget.receive(message);
                true
            }
            None => {
                tracing::debug!(id = id.0, "dropping message for unmounted widget");
                false
            }
        }
    }

    /// Tick every mounted widget once and collect the frames they produced.
    pub fn run_frame(&mut self) -> Vec<(WidgetId, FramePlan)> {
        let now = self.clock.now();
        self.widgets
            .iter_mut()
            .filter_map(|(id, w)| w.tick(now).map(|plan| (*id, plan)))
            .collect()
    }

    pub fn view(&self, id: WidgetId) -> Option<WidgetView> {
        self.widgets.get(&id).map(|w| w.view())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;

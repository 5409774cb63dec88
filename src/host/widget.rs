use std::time::Duration;

use crate::foundation::error::FxResult;
use crate::geo::land::LandCollection;
use crate::host::input::{EventDisposition, InputEvent, Layout};
use crate::host::view::WidgetView;
use crate::render::plan::FramePlan;

/// Data arriving from outside the frame loop.
#[derive(Debug)]
pub enum WidgetMessage {
    LandData(FxResult<LandCollection>),
}

/// A self-contained animated visual mounted by a host.
///
/// All methods run on the host's single UI thread. `now` is the scheduler clock's time since
/// its origin.
pub trait Widget {
    fn name(&self) -> &'static str;

    fn resize(&mut self, layout: Layout);

    fn handle_input(&mut self, _event: &InputEvent, _now: Duration) -> EventDisposition {
        EventDisposition::Ignored
    }

    fn receive(&mut self, _message: WidgetMessage) {}

    /// Advance state to `now` and describe the frame to draw, if any.
    fn tick(&mut self, now: Duration) -> Option<FramePlan>;

    fn view(&self) -> WidgetView;

    fn teardown(&mut self) {}
}

pub mod input;
pub mod scheduler;
pub mod view;
pub mod visibility;
pub mod widget;

pub use input::{EventDisposition, InputEvent, Layout};
pub use scheduler::{FrameScheduler, WidgetId};
pub use view::{AccessibleNode, ViewContent, WidgetView};
pub use visibility::ViewportGate;
pub use widget::{Widget, WidgetMessage};

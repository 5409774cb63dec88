//! Canvas animation core for the Orphta landing page.
//!
//! Widgets advance on an injected clock and describe each frame as a [`FramePlan`]; a
//! [`RenderBackend`] turns plans into premultiplied RGBA8 pixels.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod foundation;
pub mod geo;
pub mod host;
pub mod particles;
pub mod render;
pub mod text;
pub mod widgets;

pub use animation::clock::{Clock, ManualClock, SystemClock};
pub use animation::ease::Ease;
pub use config::{GlobeConfig, HeadingConfig, PageConfig, VaporConfig};
pub use foundation::color::Rgba;
pub use foundation::core::{Rgba8Premul, SurfaceSize};
pub use foundation::error::{FxError, FxResult};
pub use host::{
    EventDisposition, FrameScheduler, InputEvent, Layout, Widget, WidgetId, WidgetMessage,
    WidgetView,
};
pub use render::{CpuBackend, FramePlan, FrameRGBA, RenderBackend};
pub use text::TextRasterizer;
pub use widgets::{GlobeWidget, ParticleHeading, VaporTextWidget};

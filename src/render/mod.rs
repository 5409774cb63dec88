pub mod backend;
pub mod composite;
pub mod cpu;
pub mod plan;

pub use backend::{FrameRGBA, RenderBackend};
pub use cpu::CpuBackend;
pub use plan::{Clip, DrawOp, FramePlan, Layer, LayerBlend, Paint, RadialGradient, sample_stops};

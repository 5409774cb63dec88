use crate::foundation::error::FxResult;
use crate::render::composite::unpremultiply;
use crate::render::plan::FramePlan;

/// Rendered frame at device resolution.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha bytes, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if self.premultiplied {
            unpremultiply(&self.data)
        } else {
            self.data.clone()
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Turns frame plans into pixels.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> FxResult<FrameRGBA>;
}

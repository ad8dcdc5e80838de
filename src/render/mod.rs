mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, RectPrimitive, RectRole, TextHAlign, TextPrimitive};

use crate::error::SliderResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from gesture and reconciliation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> SliderResult<()>;
}

use crate::error::SliderResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_labels: Vec<String>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SliderResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_labels = frame.texts.iter().map(|text| text.text.clone()).collect();
        Ok(())
    }
}

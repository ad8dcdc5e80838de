use serde::{Deserialize, Serialize};

use crate::error::{SliderError, SliderResult};
use crate::render::{RectPrimitive, RectRole, TextPrimitive};

/// Backend-agnostic scene for one slider draw pass.
///
/// Coordinates are relative to the track's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub width_px: f64,
    pub height_px: f64,
    pub title: String,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width_px: f64, height_px: f64, title: impl Into<String>) -> Self {
        Self {
            width_px,
            height_px,
            title: title.into(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn rect(&self, role: RectRole) -> Option<&RectPrimitive> {
        self.rects.iter().find(|rect| rect.role == role)
    }

    pub fn validate(&self) -> SliderResult<()> {
        if !self.width_px.is_finite()
            || !self.height_px.is_finite()
            || self.width_px <= 0.0
            || self.height_px <= 0.0
        {
            return Err(SliderError::InvalidData(format!(
                "frame size must be finite and > 0: {}x{}",
                self.width_px, self.height_px
            )));
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.texts.is_empty()
    }
}

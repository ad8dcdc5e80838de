use serde::{Deserialize, Serialize};

use crate::core::{DerivedRange, FULL_TRACK_PERCENT, HandleKind, TrackElement, TrackGeometry};
use crate::error::{SliderError, SliderResult};
use crate::render::{
    Color, RectPrimitive, RectRole, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::RangeSlider;

/// Visual tuning for slider render frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRenderStyle {
    pub height_px: f64,
    pub rail_thickness_px: f64,
    pub handle_diameter_px: f64,
    pub label_font_size_px: f64,
    /// Vertical gap between a handle's top edge and its label baseline.
    pub label_gap_px: f64,
    pub rail_color: Color,
    pub fill_color: Color,
    pub handle_color: Color,
    pub label_color: Color,
}

impl Default for SliderRenderStyle {
    fn default() -> Self {
        Self {
            height_px: 48.0,
            rail_thickness_px: 4.0,
            handle_diameter_px: 20.0,
            label_font_size_px: 12.0,
            label_gap_px: 4.0,
            rail_color: Color::rgb(0.86, 0.86, 0.86),
            fill_color: Color::rgb(0.16, 0.55, 0.98),
            handle_color: Color::rgb(1.0, 1.0, 1.0),
            label_color: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

impl SliderRenderStyle {
    pub fn validate(self) -> SliderResult<Self> {
        for (name, value) in [
            ("height_px", self.height_px),
            ("rail_thickness_px", self.rail_thickness_px),
            ("handle_diameter_px", self.handle_diameter_px),
            ("label_font_size_px", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SliderError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.label_gap_px.is_finite() || self.label_gap_px < 0.0 {
            return Err(SliderError::InvalidData(
                "render style `label_gap_px` must be finite and >= 0".to_owned(),
            ));
        }
        for color in [
            self.rail_color,
            self.fill_color,
            self.handle_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        Ok(self)
    }
}

/// Lays out rail, fill, handles and labels for one derived range.
pub fn build_slider_frame(
    title: &str,
    derived: &DerivedRange,
    geometry: TrackGeometry,
    style: SliderRenderStyle,
) -> SliderResult<RenderFrame> {
    let style = style.validate()?;
    let Some(width_px) = geometry.width_px() else {
        return Err(SliderError::InvalidData(
            "track must be measured before building a render frame".to_owned(),
        ));
    };
    let center_y = style.height_px / 2.0;
    let start_x = derived.clamped_start_percent / FULL_TRACK_PERCENT * width_px;
    let end_x = derived.clamped_end_percent / FULL_TRACK_PERCENT * width_px;

    let mut frame = RenderFrame::new(width_px, style.height_px, title)
        .with_rect(RectPrimitive {
            role: RectRole::Rail,
            x: 0.0,
            y: center_y - style.rail_thickness_px / 2.0,
            width: width_px,
            height: style.rail_thickness_px,
            corner_radius: style.rail_thickness_px / 2.0,
            fill_color: style.rail_color,
        })
        .with_rect(RectPrimitive {
            role: RectRole::Fill,
            x: start_x.min(end_x),
            y: center_y - style.rail_thickness_px / 2.0,
            width: (end_x - start_x).abs(),
            height: style.rail_thickness_px,
            corner_radius: 0.0,
            fill_color: style.fill_color,
        });

    for (handle, x) in [(HandleKind::Start, start_x), (HandleKind::End, end_x)] {
        let radius = style.handle_diameter_px / 2.0;
        let role = match handle {
            HandleKind::Start => RectRole::StartHandle,
            HandleKind::End => RectRole::EndHandle,
        };
        frame = frame
            .with_rect(RectPrimitive {
                role,
                x: x - radius,
                y: center_y - radius,
                width: style.handle_diameter_px,
                height: style.handle_diameter_px,
                corner_radius: radius,
                fill_color: style.handle_color,
            })
            .with_text(TextPrimitive::new(
                derived.label_for(handle),
                x,
                center_y - radius - style.label_gap_px,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Center,
            ));
    }

    Ok(frame)
}

impl<T: TrackElement> RangeSlider<T> {
    /// Builds the current scene; the track must have been measured.
    pub fn build_render_frame(&self, style: SliderRenderStyle) -> SliderResult<RenderFrame> {
        let core = self.shared.core.borrow();
        build_slider_frame(
            &core.title,
            &core.range.derive(),
            core.calibrator.geometry(),
            style,
        )
    }

    /// Builds, validates and hands the current scene to `renderer`.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        style: SliderRenderStyle,
    ) -> SliderResult<()> {
        let frame = self.build_render_frame(style)?;
        frame.validate()?;
        renderer.render(&frame)
    }
}

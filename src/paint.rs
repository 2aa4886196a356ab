//! Drawing a [`HudFrame`] with egui

use egui::{
    pos2, Color32, ColorImage, FontId, Id, LayerId, Order, Painter, Rect, Rounding, Stroke,
    TextureHandle, TextureOptions, Vec2,
};
use image::RgbaImage;
use std::f32::consts::TAU;
use std::sync::Arc;

use crate::overlay::widgets::{scale_about, stack_layout};
use crate::overlay::{HudFrame, SpinnerFrame};

const SPOKES: usize = 12;

/// Paints the HUD above everything else in an egui context
///
/// Keeps the glyph texture between frames and uploads a new one only when
/// the controller hands over a different bitmap.
#[derive(Default)]
pub struct HudPainter {
    texture: Option<(Arc<RgbaImage>, TextureHandle)>,
}

impl HudPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint(&mut self, ctx: &egui::Context, frame: &HudFrame) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("simple_hud")));

        painter.rect_filled(
            frame.container,
            Rounding::ZERO,
            frame.tint.gamma_multiply(frame.container_alpha),
        );

        let opacity = frame.container_alpha * frame.panel_alpha;
        let scale = frame.panel_scale.max(0.01);
        let origin = frame.panel.center();

        painter.rect_filled(
            scale_about(frame.panel, origin, scale),
            Rounding::same(frame.style.corner_radius * scale),
            frame.panel_fill.gamma_multiply(opacity),
        );

        let galley = frame.text.as_ref().map(|text| {
            painter.layout_no_wrap(
                text.text.clone(),
                FontId::proportional(text.font_size * scale),
                text.color.gamma_multiply(opacity * text.alpha),
            )
        });
        let text_size = galley
            .as_ref()
            .map(|galley| galley.size() / scale)
            .unwrap_or(Vec2::ZERO);

        let stack = stack_layout(frame.panel, frame.layout, frame.indicator_slot, text_size, &frame.style);

        if let (Some(spinner), Some(slot)) = (&frame.spinner, stack.indicator) {
            draw_spinner(&painter, scale_about(slot, origin, scale), spinner, opacity);
        }

        match (&frame.glyph, stack.glyph(&frame.style)) {
            (Some(glyph), Some(rect)) => {
                let texture = self.texture_for(ctx, &glyph.image);
                painter.image(
                    texture,
                    scale_about(rect, origin, scale),
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE.gamma_multiply(opacity),
                );
            }
            (None, _) => self.texture = None,
            _ => {}
        }

        if let Some(galley) = galley {
            let label = scale_about(stack.label, origin, scale);
            painter.galley(label.min, galley, Color32::PLACEHOLDER);
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, image: &Arc<RgbaImage>) -> egui::TextureId {
        if let Some((cached, handle)) = &self.texture {
            if Arc::ptr_eq(cached, image) {
                return handle.id();
            }
        }

        let color_image = ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );
        let handle = ctx.load_texture("hud_glyph", color_image, TextureOptions::LINEAR);
        let id = handle.id();
        self.texture = Some((Arc::clone(image), handle));
        id
    }
}

/// Twelve spokes, brightest at the leading one
fn draw_spinner(painter: &Painter, slot: Rect, spinner: &SpinnerFrame, opacity: f32) {
    let center = slot.center();
    let radius = slot.width().min(slot.height()) / 2.0;
    let width = (radius * 0.18).max(1.0);

    for i in 0..SPOKES {
        let angle = spinner.rotation - i as f32 * TAU / SPOKES as f32;
        let direction = Vec2::angled(angle);
        let fade = 1.0 - i as f32 / SPOKES as f32;
        painter.line_segment(
            [center + direction * radius * 0.45, center + direction * radius * 0.95],
            Stroke::new(width, spinner.color.gamma_multiply(opacity * fade.max(0.15))),
        );
    }
}

//! Panel styling and stack layout for the HUD

use egui::{pos2, Rect, Vec2};

use crate::config::AppearanceConfig;
use crate::overlay::state::{Layout, StackAxis};

/// Style configuration for the panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    /// Border radius
    pub corner_radius: f32,
    /// Gap between indicator and text
    pub spacing: f32,
    /// Text size in points
    pub font_size: f32,
    /// Side of the square indicator slot (spinner footprint)
    pub indicator_size: f32,
    /// Side of the glyph drawn centered in the indicator slot
    pub glyph_size: f32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            corner_radius: 20.0,
            spacing: 10.0,
            font_size: 20.0,
            indicator_size: 37.0,
            glyph_size: crate::icon::CANVAS_SIZE,
        }
    }
}

impl From<&AppearanceConfig> for PanelStyle {
    fn from(config: &AppearanceConfig) -> Self {
        Self {
            corner_radius: config.corner_radius,
            spacing: config.spacing,
            font_size: config.font_size,
            ..Default::default()
        }
    }
}

/// Placement of the panel's children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    /// Indicator slot, absent when the content collapses it
    pub indicator: Option<Rect>,
    /// Text block
    pub label: Rect,
}

impl StackLayout {
    /// Glyph rect centered over the indicator slot
    pub fn glyph(&self, style: &PanelStyle) -> Option<Rect> {
        self.indicator
            .map(|slot| Rect::from_center_size(slot.center(), Vec2::splat(style.glyph_size)))
    }
}

/// Lay out the indicator and text as a stack centered in `panel`
///
/// `text_size` is the measured size of the text block (zero when there is none).
pub fn stack_layout(
    panel: Rect,
    layout: Layout,
    show_indicator: bool,
    text_size: Vec2,
    style: &PanelStyle,
) -> StackLayout {
    let center = panel.center();

    if !show_indicator {
        return StackLayout {
            indicator: None,
            label: Rect::from_center_size(center, text_size),
        };
    }

    let indicator = Vec2::splat(style.indicator_size);
    match layout.axis() {
        StackAxis::Row => {
            let width = indicator.x + style.spacing + text_size.x;
            let left = center.x - width / 2.0;
            let indicator_rect = Rect::from_min_size(pos2(left, center.y - indicator.y / 2.0), indicator);
            let label = Rect::from_min_size(
                pos2(indicator_rect.max.x + style.spacing, center.y - text_size.y / 2.0),
                text_size,
            );
            StackLayout {
                indicator: Some(indicator_rect),
                label,
            }
        }
        StackAxis::Column => {
            let height = indicator.y + style.spacing + text_size.y;
            let top = center.y - height / 2.0;
            let indicator_rect = Rect::from_min_size(pos2(center.x - indicator.x / 2.0, top), indicator);
            let label = Rect::from_min_size(
                pos2(center.x - text_size.x / 2.0, indicator_rect.max.y + style.spacing),
                text_size,
            );
            StackLayout {
                indicator: Some(indicator_rect),
                label,
            }
        }
    }
}

/// Scale `rect` about `origin`, used to apply the panel's pop transform to its children
pub fn scale_about(rect: Rect, origin: egui::Pos2, scale: f32) -> Rect {
    Rect::from_min_max(
        origin + (rect.min - origin) * scale,
        origin + (rect.max - origin) * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(layout: Layout) -> Rect {
        Rect::from_center_size(pos2(200.0, 400.0), layout.panel_size())
    }

    #[test]
    fn test_row_layout() {
        let style = PanelStyle::default();
        let stack = stack_layout(
            panel(Layout::Horizontal),
            Layout::Horizontal,
            true,
            Vec2::new(100.0, 24.0),
            &style,
        );

        let indicator = stack.indicator.unwrap();
        // 37 + 10 + 100 = 147 wide, centered on x = 200
        assert!((indicator.min.x - 126.5).abs() < 0.001);
        assert!((indicator.center().y - 400.0).abs() < 0.001);
        assert!((stack.label.min.x - (indicator.max.x + 10.0)).abs() < 0.001);
        assert!((stack.label.center().y - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_column_layout() {
        let style = PanelStyle::default();
        let stack = stack_layout(
            panel(Layout::Vertical),
            Layout::Vertical,
            true,
            Vec2::new(120.0, 24.0),
            &style,
        );

        let indicator = stack.indicator.unwrap();
        assert!((indicator.center().x - 200.0).abs() < 0.001);
        assert!((stack.label.center().x - 200.0).abs() < 0.001);
        assert!((stack.label.min.y - (indicator.max.y + 10.0)).abs() < 0.001);
        // 37 + 10 + 24 = 71 tall, centered on y = 400
        assert!((indicator.min.y - 364.5).abs() < 0.001);
    }

    #[test]
    fn test_collapsed_indicator_centers_label() {
        let style = PanelStyle::default();
        let stack = stack_layout(
            panel(Layout::Horizontal),
            Layout::Horizontal,
            false,
            Vec2::new(80.0, 24.0),
            &style,
        );

        assert!(stack.indicator.is_none());
        assert!(stack.glyph(&style).is_none());
        assert_eq!(stack.label.center(), pos2(200.0, 400.0));
    }

    #[test]
    fn test_glyph_centered_in_slot() {
        let style = PanelStyle::default();
        let stack = stack_layout(panel(Layout::Vertical), Layout::Vertical, true, Vec2::ZERO, &style);

        let glyph = stack.glyph(&style).unwrap();
        assert_eq!(glyph.center(), stack.indicator.unwrap().center());
        assert_eq!(glyph.size(), Vec2::splat(36.0));
    }

    #[test]
    fn test_scale_about_center() {
        let rect = Rect::from_center_size(pos2(100.0, 100.0), Vec2::splat(50.0));
        let scaled = scale_about(rect, pos2(100.0, 100.0), 0.1);

        assert_eq!(scaled.center(), pos2(100.0, 100.0));
        assert!((scaled.width() - 5.0).abs() < 0.001);
    }
}

//! Overlay data model: theme, layout, content and the live session

use egui::{Color32, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::host::SurfaceId;

/// Color theme of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Color used for the spinner, glyphs and text
    pub fn foreground(&self) -> Color32 {
        match self {
            Theme::Light => Color32::BLACK,
            Theme::Dark => Color32::WHITE,
        }
    }

    /// Translucent tint laid over the whole host surface
    pub fn background_tint(&self) -> Color32 {
        match self {
            Theme::Light => Color32::from_rgba_unmultiplied(77, 77, 77, 128),
            Theme::Dark => Color32::from_rgba_unmultiplied(204, 204, 204, 128),
        }
    }

    /// Fill standing in for the blurred panel material
    pub fn panel_fill(&self) -> Color32 {
        match self {
            Theme::Light => Color32::from_rgba_unmultiplied(242, 242, 242, 235),
            Theme::Dark => Color32::from_rgba_unmultiplied(28, 28, 30, 235),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Direction the indicator and the text are stacked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAxis {
    Row,
    Column,
}

/// Horizontal alignment of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Panel arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

impl Layout {
    /// Fixed panel size in points
    pub fn panel_size(&self) -> Vec2 {
        match self {
            Layout::Horizontal => Vec2::new(280.0, 70.0),
            Layout::Vertical => Vec2::new(250.0, 120.0),
        }
    }

    pub fn axis(&self) -> StackAxis {
        match self {
            Layout::Horizontal => StackAxis::Row,
            Layout::Vertical => StackAxis::Column,
        }
    }

    pub fn text_align(&self) -> TextAlign {
        match self {
            Layout::Horizontal => TextAlign::Left,
            Layout::Vertical => TextAlign::Center,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
        }
    }
}

/// What the indicator slot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Loading,
    Success,
    Error,
    Info,
    None,
}

impl ContentKind {
    /// Spinner is visible and animating
    pub fn shows_spinner(&self) -> bool {
        matches!(self, ContentKind::Loading)
    }

    /// The indicator keeps its space in the stack. Glyph content hides the
    /// spinner but keeps the slot; `None` collapses it.
    pub fn reserves_indicator_slot(&self) -> bool {
        !matches!(self, ContentKind::None)
    }
}

/// The single live overlay instance
#[derive(Debug, Clone)]
pub struct OverlaySession {
    pub theme: Theme,
    pub layout: Layout,
    pub content: ContentKind,
    /// Current text; `None` once a hide completes
    pub message: Option<String>,
    /// Host requested by the last `show`; `None` means the top-level surface
    pub host: Option<SurfaceId>,
    /// Surface the panel is attached to right now
    pub attached: Option<SurfaceId>,
    /// Bounds of the attached surface
    pub bounds: Rect,
    /// Pixel density of the attached surface
    pub scale_factor: f32,
}

impl OverlaySession {
    pub fn new(theme: Theme, layout: Layout) -> Self {
        Self {
            theme,
            layout,
            content: ContentKind::Loading,
            message: None,
            host: None,
            attached: None,
            bounds: Rect::NOTHING,
            scale_factor: 1.0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Panel rectangle centered in the current host bounds
    pub fn panel_rect(&self) -> Rect {
        Rect::from_center_size(self.bounds.center(), self.layout.panel_size())
    }
}

impl Default for OverlaySession {
    fn default() -> Self {
        Self::new(Theme::default(), Layout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_theme_colors() {
        assert_eq!(Theme::Light.foreground(), Color32::BLACK);
        assert_eq!(Theme::Dark.foreground(), Color32::WHITE);
        assert_ne!(Theme::Light.background_tint(), Theme::Dark.background_tint());
        assert_eq!(Theme::Dark.background_tint().a(), 128);
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(Layout::Horizontal.panel_size(), Vec2::new(280.0, 70.0));
        assert_eq!(Layout::Vertical.panel_size(), Vec2::new(250.0, 120.0));
        assert_eq!(Layout::Horizontal.axis(), StackAxis::Row);
        assert_eq!(Layout::Vertical.axis(), StackAxis::Column);
        assert_eq!(Layout::Horizontal.text_align(), TextAlign::Left);
        assert_eq!(Layout::Vertical.text_align(), TextAlign::Center);
    }

    #[test]
    fn test_content_slots() {
        assert!(ContentKind::Loading.shows_spinner());
        assert!(!ContentKind::Success.shows_spinner());
        assert!(ContentKind::Info.reserves_indicator_slot());
        assert!(!ContentKind::None.reserves_indicator_slot());
    }

    #[test]
    fn test_panel_rect_is_centered() {
        let mut session = OverlaySession::new(Theme::Dark, Layout::Vertical);
        session.bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 800.0));

        let panel = session.panel_rect();
        assert_eq!(panel.center(), pos2(200.0, 400.0));
        assert_eq!(panel.size(), Vec2::new(250.0, 120.0));
    }

    #[test]
    fn test_defaults_match_show_defaults() {
        let session = OverlaySession::default();
        assert_eq!(session.theme, Theme::Dark);
        assert_eq!(session.layout, Layout::Horizontal);
        assert!(session.message.is_none());
        assert!(!session.is_attached());
    }
}

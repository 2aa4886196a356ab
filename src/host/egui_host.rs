//! egui window as the host surface
//!
//! The whole egui screen is the single top-level surface. Input blocking is
//! reported through `interaction_enabled` for the app to honor.

use egui::Rect;
use tracing::debug;

use crate::host::{BoundsObservers, BoundsSubscription, HostBinding, SurfaceId};

/// The screen surface of an egui context
pub const SCREEN: SurfaceId = SurfaceId(0);

#[derive(Debug)]
pub struct EguiHost {
    screen: Rect,
    pixels_per_point: f32,
    attached: bool,
    interaction_enabled: bool,
    observers: BoundsObservers,
}

impl EguiHost {
    pub fn new() -> Self {
        Self {
            screen: Rect::NOTHING,
            pixels_per_point: 1.0,
            attached: false,
            interaction_enabled: true,
            observers: BoundsObservers::default(),
        }
    }

    /// Pick up the current screen rect and density; call once per frame
    pub fn sync(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        if screen != self.screen {
            debug!("Screen resized to {:?}", screen.size());
            self.screen = screen;
            self.observers.notify(SCREEN, screen);
        }
        self.pixels_per_point = ctx.pixels_per_point();
    }

    /// Whether the app below the HUD should accept input
    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for EguiHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostBinding for EguiHost {
    fn top_level(&self) -> Option<SurfaceId> {
        self.screen.is_positive().then_some(SCREEN)
    }

    fn bounds(&self, surface: SurfaceId) -> Option<Rect> {
        (surface == SCREEN && self.screen.is_positive()).then_some(self.screen)
    }

    fn scale_factor(&self, _surface: SurfaceId) -> f32 {
        self.pixels_per_point
    }

    fn attach(&mut self, surface: SurfaceId) -> Option<BoundsSubscription> {
        if surface != SCREEN {
            return None;
        }
        self.attached = true;
        Some(self.observers.subscribe(surface))
    }

    fn detach(&mut self, surface: SurfaceId) {
        if surface == SCREEN {
            self.attached = false;
        }
    }

    fn set_interaction_enabled(&mut self, surface: SurfaceId, enabled: bool) {
        if surface == SCREEN {
            self.interaction_enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, RawInput};

    fn context_with_screen(size: egui::Vec2) -> egui::Context {
        let ctx = egui::Context::default();
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(pos2(0.0, 0.0), size)),
            ..Default::default()
        };
        let _ = ctx.run(input, |_| {});
        ctx
    }

    #[test]
    fn test_no_screen_before_first_sync() {
        let host = EguiHost::new();
        assert!(host.top_level().is_none());
        assert!(host.resolve(None).is_none());
    }

    #[test]
    fn test_sync_tracks_screen() {
        let mut host = EguiHost::new();
        host.sync(&context_with_screen(vec2(800.0, 600.0)));

        let (surface, bounds) = host.resolve(None).unwrap();
        assert_eq!(surface, SCREEN);
        assert_eq!(bounds.size(), vec2(800.0, 600.0));
        assert!(host.resolve(Some(SurfaceId(5))).is_none());
    }

    #[test]
    fn test_resize_reaches_subscription() {
        let mut host = EguiHost::new();
        host.sync(&context_with_screen(vec2(800.0, 600.0)));
        let subscription = host.attach(SCREEN).unwrap();

        host.sync(&context_with_screen(vec2(600.0, 800.0)));

        assert_eq!(subscription.latest().unwrap().size(), vec2(600.0, 800.0));
    }

    #[test]
    fn test_interaction_toggle() {
        let mut host = EguiHost::new();
        host.set_interaction_enabled(SCREEN, false);
        assert!(!host.interaction_enabled());
        host.detach(SCREEN);
        host.detach(SCREEN);
        assert!(!host.is_attached());
    }
}

//! In-memory host surfaces
//!
//! Keeps surfaces as plain rectangles and records every attach, detach and
//! interaction change. Used by the scripted demo and throughout the tests.

use egui::{pos2, Rect, Vec2};
use std::collections::BTreeMap;
use tracing::debug;

use crate::host::{BoundsObservers, BoundsSubscription, HostBinding, SurfaceId};

/// Something the overlay did to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Attached(SurfaceId),
    Detached(SurfaceId),
    InteractionChanged(SurfaceId, bool),
}

#[derive(Debug, Clone)]
struct Surface {
    bounds: Rect,
    scale_factor: f32,
    interaction_enabled: bool,
    overlay_attached: bool,
}

/// Host backed by in-memory surfaces
#[derive(Debug, Default)]
pub struct HeadlessHost {
    surfaces: BTreeMap<SurfaceId, Surface>,
    top_level: Option<SurfaceId>,
    next_id: u64,
    observers: BoundsObservers,
    events: Vec<HostEvent>,
}

impl HeadlessHost {
    /// Host without any surface, not even a screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with a top-level screen of `size` at the origin
    pub fn with_screen(size: Vec2) -> Self {
        let mut host = Self::new();
        let screen = host.add_surface(Rect::from_min_size(pos2(0.0, 0.0), size));
        host.top_level = Some(screen);
        host
    }

    /// Add a surface (a view inside the screen)
    pub fn add_surface(&mut self, bounds: Rect) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.surfaces.insert(
            id,
            Surface {
                bounds,
                scale_factor: 1.0,
                interaction_enabled: true,
                overlay_attached: false,
            },
        );
        id
    }

    /// Forget a surface, as if its view was torn down
    pub fn remove_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
        if self.top_level == Some(surface) {
            self.top_level = None;
        }
    }

    pub fn screen(&self) -> Option<SurfaceId> {
        self.top_level
    }

    pub fn set_scale_factor(&mut self, surface: SurfaceId, scale_factor: f32) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.scale_factor = scale_factor;
        }
    }

    /// Resize a surface and tell the subscribers
    pub fn set_bounds(&mut self, surface: SurfaceId, bounds: Rect) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.bounds = bounds;
            self.observers.notify(surface, bounds);
        }
    }

    /// Swap width and height, like a device rotation
    pub fn rotate(&mut self, surface: SurfaceId) {
        if let Some(bounds) = self.bounds(surface) {
            let rotated = Rect::from_min_size(bounds.min, Vec2::new(bounds.height(), bounds.width()));
            self.set_bounds(surface, rotated);
        }
    }

    pub fn is_attached(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(&surface)
            .map(|s| s.overlay_attached)
            .unwrap_or(false)
    }

    /// Surfaces currently holding an overlay panel
    pub fn attached_surfaces(&self) -> Vec<SurfaceId> {
        self.surfaces
            .iter()
            .filter(|(_, s)| s.overlay_attached)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn interaction_enabled(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(&surface)
            .map(|s| s.interaction_enabled)
            .unwrap_or(true)
    }

    /// Live bounds subscriptions on `surface`
    pub fn observer_count(&self, surface: SurfaceId) -> usize {
        self.observers.count(surface)
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }
}

impl HostBinding for HeadlessHost {
    fn top_level(&self) -> Option<SurfaceId> {
        self.top_level
    }

    fn bounds(&self, surface: SurfaceId) -> Option<Rect> {
        self.surfaces.get(&surface).map(|s| s.bounds)
    }

    fn scale_factor(&self, surface: SurfaceId) -> f32 {
        self.surfaces
            .get(&surface)
            .map(|s| s.scale_factor)
            .unwrap_or(1.0)
    }

    fn attach(&mut self, surface: SurfaceId) -> Option<BoundsSubscription> {
        let s = self.surfaces.get_mut(&surface)?;
        if !s.overlay_attached {
            s.overlay_attached = true;
            self.events.push(HostEvent::Attached(surface));
        }
        Some(self.observers.subscribe(surface))
    }

    fn detach(&mut self, surface: SurfaceId) {
        match self.surfaces.get_mut(&surface) {
            Some(s) if s.overlay_attached => {
                s.overlay_attached = false;
                self.events.push(HostEvent::Detached(surface));
            }
            Some(_) => {}
            None => debug!("Surface {:?} already gone, nothing to detach", surface),
        }
    }

    fn set_interaction_enabled(&mut self, surface: SurfaceId, enabled: bool) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            if s.interaction_enabled != enabled {
                s.interaction_enabled = enabled;
                self.events.push(HostEvent::InteractionChanged(surface, enabled));
            }
        }
    }
}

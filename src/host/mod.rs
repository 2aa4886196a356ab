//! Host Surface Binding
//!
//! The overlay never owns a window. A host supplies the surface it attaches
//! to: its bounds, pixel density, a way to add and remove the panel, and
//! input blocking while the HUD is up.

pub mod egui_host;
pub mod headless;

pub use egui_host::EguiHost;
pub use headless::{HeadlessHost, HostEvent};

use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::Rect;
use serde::Serialize;
use std::sync::{Arc, Weak};

/// Opaque handle of a surface the overlay can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SurfaceId(pub u64);

/// Operations the overlay needs from the UI platform
pub trait HostBinding {
    /// Top-level screen/window, used when `show` names no host
    fn top_level(&self) -> Option<SurfaceId>;

    /// Current bounds of `surface`, `None` once it is gone
    fn bounds(&self, surface: SurfaceId) -> Option<Rect>;

    /// Device pixels per logical unit on `surface`
    fn scale_factor(&self, _surface: SurfaceId) -> f32 {
        1.0
    }

    /// Add the overlay panel to `surface`
    ///
    /// Returns a subscription to the surface's bounds that lives as long as
    /// the attachment, or `None` if the surface no longer exists.
    fn attach(&mut self, surface: SurfaceId) -> Option<BoundsSubscription>;

    /// Remove the overlay panel from `surface`. Idempotent, and tolerates a
    /// surface that has already disappeared.
    fn detach(&mut self, surface: SurfaceId);

    /// Toggle input on `surface` while the HUD covers it
    fn set_interaction_enabled(&mut self, surface: SurfaceId, enabled: bool);

    /// Resolve an optional host to a concrete surface and its bounds
    fn resolve(&self, host: Option<SurfaceId>) -> Option<(SurfaceId, Rect)> {
        let surface = host.or_else(|| self.top_level())?;
        let bounds = self.bounds(surface)?;
        Some((surface, bounds))
    }
}

/// Stream of bounds changes for one surface (rotation, resize)
///
/// Dropping the subscription unregisters it.
#[derive(Debug)]
pub struct BoundsSubscription {
    surface: SurfaceId,
    receiver: Receiver<Rect>,
    _token: Arc<()>,
}

impl BoundsSubscription {
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Most recent pending bounds, discarding older ones
    pub fn latest(&self) -> Option<Rect> {
        self.receiver.try_iter().last()
    }
}

/// Sender side of bounds subscriptions, kept by host implementations
#[derive(Debug, Default)]
pub struct BoundsObservers {
    observers: Vec<Observer>,
}

#[derive(Debug)]
struct Observer {
    surface: SurfaceId,
    sender: Sender<Rect>,
    token: Weak<()>,
}

impl BoundsObservers {
    pub fn subscribe(&mut self, surface: SurfaceId) -> BoundsSubscription {
        self.prune();
        let (sender, receiver) = unbounded();
        let token = Arc::new(());
        self.observers.push(Observer {
            surface,
            sender,
            token: Arc::downgrade(&token),
        });
        BoundsSubscription {
            surface,
            receiver,
            _token: token,
        }
    }

    /// Deliver new bounds of `surface` to its live subscribers
    pub fn notify(&mut self, surface: SurfaceId, bounds: Rect) {
        self.prune();
        for observer in self.observers.iter().filter(|o| o.surface == surface) {
            let _ = observer.sender.send(bounds);
        }
    }

    /// Number of live subscriptions on `surface`
    pub fn count(&self, surface: SurfaceId) -> usize {
        self.observers
            .iter()
            .filter(|o| o.surface == surface && o.token.strong_count() > 0)
            .count()
    }

    fn prune(&mut self) {
        self.observers.retain(|o| o.token.strong_count() > 0);
    }
}

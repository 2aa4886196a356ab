//! Process-wide access point
//!
//! The controller itself lives on the UI thread. What is shared process-wide
//! is a handle to it, installed once at startup.

use std::sync::OnceLock;
use tracing::warn;

use crate::host::SurfaceId;
use crate::shared::handle::{HudError, HudHandle};
use crate::shared::messages::{Completion, ShowRequest};

static GLOBAL: OnceLock<HudHandle> = OnceLock::new();

/// Make `handle` the process-wide HUD. Only the first call succeeds.
pub fn install(handle: HudHandle) -> Result<(), HudError> {
    GLOBAL.set(handle).map_err(|_| HudError::AlreadyInstalled)
}

/// The installed handle, if any
pub fn global() -> Option<&'static HudHandle> {
    GLOBAL.get()
}

fn with_global(operation: &str, f: impl FnOnce(&HudHandle)) {
    match global() {
        Some(handle) => f(handle),
        None => warn!("HUD {} ignored: no handle installed", operation),
    }
}

pub fn show(request: ShowRequest) {
    with_global("show", |hud| hud.show(request));
}

pub fn update_text(message: impl Into<String>) {
    let message = message.into();
    with_global("update_text", |hud| hud.update_text(message));
}

pub fn hide(on_hidden: Option<Completion>) {
    with_global("hide", |hud| hud.hide(on_hidden));
}

pub fn hide_with_result(success: bool, message: Option<String>, on_hidden: Option<Completion>) {
    with_global("hide_with_result", |hud| {
        hud.hide_with_result(success, message, on_hidden)
    });
}

/// HUD shortcuts on a host surface, going through the installed handle
pub trait SurfaceHudExt {
    /// Show the HUD on this surface
    fn show_hud(&self, request: ShowRequest);

    /// Hide the HUD
    fn hide_hud(&self, on_hidden: Option<Completion>);

    /// Show a result on the HUD, then hide it
    fn hide_hud_with_result(
        &self,
        success: bool,
        message: Option<String>,
        on_hidden: Option<Completion>,
    );
}

impl SurfaceHudExt for SurfaceId {
    fn show_hud(&self, request: ShowRequest) {
        show(request.on(*self));
    }

    fn hide_hud(&self, on_hidden: Option<Completion>) {
        hide(on_hidden);
    }

    fn hide_hud_with_result(
        &self,
        success: bool,
        message: Option<String>,
        on_hidden: Option<Completion>,
    ) {
        hide_with_result(success, message, on_hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HudConfig;
    use crate::host::HeadlessHost;
    use crate::overlay::{OverlayController, Phase};
    use egui::{pos2, vec2, Rect};
    use std::time::{Duration, Instant};

    // The only test in the crate touching the process-wide handle
    #[test]
    fn test_installed_handle_drives_controller() {
        let mut host = HeadlessHost::with_screen(vec2(390.0, 844.0));
        let view = host.add_surface(Rect::from_min_size(pos2(20.0, 100.0), vec2(350.0, 400.0)));
        let mut controller = OverlayController::new(host, &HudConfig::default());
        let start = Instant::now();
        controller.tick(start);

        install(controller.handle()).unwrap();
        assert!(matches!(
            install(controller.handle()),
            Err(HudError::AlreadyInstalled)
        ));

        view.show_hud(ShowRequest::new().message("Fetching Projects..."));
        controller.tick(start + Duration::from_millis(10));
        assert_eq!(controller.phase(), Phase::Showing);
        assert_eq!(controller.session().attached, Some(view));

        update_text("Fetching Files...");
        view.hide_hud(None);
        controller.tick(start + Duration::from_millis(20));
        assert_eq!(controller.phase(), Phase::Hiding);
        assert_eq!(controller.session().message.as_deref(), Some("Fetching Files..."));

        controller.tick(start + Duration::from_millis(400));
        assert_eq!(controller.phase(), Phase::Hidden);
        assert!(controller.host().attached_surfaces().is_empty());
    }
}

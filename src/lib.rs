//! SimpleHUD - singleton status overlay
//!
//! A tinted panel with a spinner, a success/error/info glyph and one line
//! of text, popped in and out above a host surface. One
//! [`OverlayController`] per process owns the session and runs on the UI
//! thread; everything else talks to it through a [`HudHandle`].
//!
//! ```no_run
//! use simple_hud::config::HudConfig;
//! use simple_hud::host::HeadlessHost;
//! use simple_hud::{OverlayController, ShowRequest};
//! use std::time::Instant;
//!
//! let host = HeadlessHost::with_screen(egui::vec2(390.0, 844.0));
//! let mut controller = OverlayController::new(host, &HudConfig::default());
//! simple_hud::install(controller.handle()).unwrap();
//!
//! simple_hud::show(ShowRequest::new().message("Fetching data..."));
//! controller.tick(Instant::now());
//! ```

pub mod config;
pub mod host;
pub mod icon;
pub mod overlay;
pub mod paint;
pub mod shared;

pub use overlay::{ContentKind, HudFrame, HudStatus, Layout, OverlayController, Phase, Theme};
pub use paint::HudPainter;
pub use shared::{
    global, hide, hide_with_result, install, show, update_text, Completion, HudCommand, HudError,
    HudHandle, ShowRequest, SurfaceHudExt,
};

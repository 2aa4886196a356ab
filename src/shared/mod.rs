//! Command messaging between callers and the overlay controller
//!
//! Callers on any thread talk to the controller through a [`HudHandle`];
//! the controller applies the queued commands on the UI thread.

pub mod global;
pub mod handle;
pub mod messages;

pub use global::{global, hide, hide_with_result, install, show, update_text, SurfaceHudExt};
pub use handle::{HudError, HudHandle};
pub use messages::{Completion, HudCommand, ShowRequest, DEFAULT_MESSAGE};

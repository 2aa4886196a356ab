//! Overlay Presentation Layer
//!
//! The HUD panel: its data model, styling, animations and the controller
//! that runs the show / update / hide state machine.

pub mod animation;
pub mod controller;
pub mod state;
pub mod widgets;

pub use animation::{PanelVisuals, Tween};
pub use controller::{
    GlyphFrame, HudFrame, HudStatus, OverlayController, Phase, SpinnerFrame, TextFrame,
};
pub use state::{ContentKind, Layout, OverlaySession, StackAxis, TextAlign, Theme};
pub use widgets::{stack_layout, PanelStyle, StackLayout};

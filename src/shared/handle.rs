//! Thread-safe handle to the overlay controller

use crossbeam_channel::Sender;
use thiserror::Error;
use tracing::warn;

use crate::shared::messages::{Completion, HudCommand, ShowRequest};

/// HUD error types
#[derive(Debug, Error)]
pub enum HudError {
    #[error("Overlay controller is gone")]
    ControllerGone,
    #[error("A HUD handle is already installed")]
    AlreadyInstalled,
}

/// Cloneable sender of HUD commands
///
/// Every method enqueues and returns immediately. The commands are applied
/// in call order on the controller's thread during its next `tick`.
#[derive(Debug, Clone)]
pub struct HudHandle {
    sender: Sender<HudCommand>,
}

impl HudHandle {
    pub(crate) fn new(sender: Sender<HudCommand>) -> Self {
        Self { sender }
    }

    /// Enqueue a raw command
    pub fn send(&self, command: HudCommand) -> Result<(), HudError> {
        self.sender
            .send(command)
            .map_err(|_| HudError::ControllerGone)
    }

    pub fn show(&self, request: ShowRequest) {
        self.dispatch(HudCommand::Show(request));
    }

    pub fn update_text(&self, message: impl Into<String>) {
        self.dispatch(HudCommand::UpdateText(message.into()));
    }

    pub fn hide(&self, on_hidden: Option<Completion>) {
        self.dispatch(HudCommand::Hide { on_hidden });
    }

    /// Show a success or error result for a moment, then hide
    pub fn hide_with_result(
        &self,
        success: bool,
        message: Option<String>,
        on_hidden: Option<Completion>,
    ) {
        self.dispatch(HudCommand::HideWithResult {
            success,
            message,
            on_hidden,
        });
    }

    fn dispatch(&self, command: HudCommand) {
        if let Err(e) = self.send(command) {
            warn!("Dropping HUD command: {}", e);
        }
    }
}

//! Commands sent from any thread to the overlay controller

use std::fmt;

use crate::host::SurfaceId;
use crate::overlay::{ContentKind, Layout, Theme};

/// Text shown by `show` when the caller does not give one
pub const DEFAULT_MESSAGE: &str = "Loading...";

/// Callback fired once an overlay operation completes
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Parameters of a `show` call
pub struct ShowRequest {
    /// Surface to attach to; `None` means the top-level surface
    pub host: Option<SurfaceId>,
    pub theme: Theme,
    pub layout: Layout,
    pub content: ContentKind,
    pub message: Option<String>,
    /// Fired once the pop-in or text cross-fade finishes
    pub on_shown: Option<Completion>,
}

impl ShowRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, host: SurfaceId) -> Self {
        self.host = Some(host);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn content(mut self, content: ContentKind) -> Self {
        self.content = content;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Show the panel without any text
    pub fn no_message(mut self) -> Self {
        self.message = None;
        self
    }

    pub fn on_shown(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_shown = Some(Box::new(callback));
        self
    }
}

impl Default for ShowRequest {
    fn default() -> Self {
        Self {
            host: None,
            theme: Theme::Dark,
            layout: Layout::Horizontal,
            content: ContentKind::Loading,
            message: Some(DEFAULT_MESSAGE.to_string()),
            on_shown: None,
        }
    }
}

impl fmt::Debug for ShowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRequest")
            .field("host", &self.host)
            .field("theme", &self.theme)
            .field("layout", &self.layout)
            .field("content", &self.content)
            .field("message", &self.message)
            .field("on_shown", &self.on_shown.is_some())
            .finish()
    }
}

/// Operations queued for the UI thread
pub enum HudCommand {
    /// Present or reconfigure the overlay
    Show(ShowRequest),
    /// Cross-fade to new text
    UpdateText(String),
    /// Pop the overlay out and detach it
    Hide { on_hidden: Option<Completion> },
    /// Show a success or error result, dwell, then hide
    HideWithResult {
        success: bool,
        message: Option<String>,
        on_hidden: Option<Completion>,
    },
}

impl fmt::Debug for HudCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudCommand::Show(request) => f.debug_tuple("Show").field(request).finish(),
            HudCommand::UpdateText(message) => f.debug_tuple("UpdateText").field(message).finish(),
            HudCommand::Hide { on_hidden } => f
                .debug_struct("Hide")
                .field("on_hidden", &on_hidden.is_some())
                .finish(),
            HudCommand::HideWithResult {
                success,
                message,
                on_hidden,
            } => f
                .debug_struct("HideWithResult")
                .field("success", success)
                .field("message", message)
                .field("on_hidden", &on_hidden.is_some())
                .finish(),
        }
    }
}

//! Demo scenarios
//!
//! The buttons of the demo window and the scripted run share these: a show
//! followed by a chain of steps spaced by a fixed delay.

pub mod app;
pub mod script;

use std::time::Duration;

use simple_hud::config::HudConfig;
use simple_hud::{Completion, ContentKind, HudCommand, Layout, ShowRequest, Theme};

/// Pause before each step
pub const STEP_DELAY: Duration = Duration::from_secs(3);

/// What happens after a delay
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Text(&'static str),
    Hide,
    Result { success: bool, message: &'static str },
}

impl Step {
    /// Command for this step; `on_hidden` only applies to the hiding steps
    pub fn command(&self, on_hidden: Option<Completion>) -> HudCommand {
        match *self {
            Step::Text(message) => HudCommand::UpdateText(message.to_string()),
            Step::Hide => HudCommand::Hide { on_hidden },
            Step::Result { success, message } => HudCommand::HideWithResult {
                success,
                message: Some(message.to_string()),
                on_hidden,
            },
        }
    }
}

#[derive(Debug)]
pub struct Scenario {
    pub label: &'static str,
    pub theme: Theme,
    pub layout: Layout,
    pub content: ContentKind,
    /// `None` shows the configured default message
    pub message: Option<&'static str>,
    pub steps: &'static [Step],
}

impl Scenario {
    pub fn request(&self, config: &HudConfig) -> ShowRequest {
        let request = config
            .show_request()
            .theme(self.theme)
            .layout(self.layout)
            .content(self.content);
        match self.message {
            Some(message) => request.message(message),
            None => request,
        }
    }
}

pub static SCENARIOS: [Scenario; 7] = [
    Scenario {
        label: "Light horizontal",
        theme: Theme::Light,
        layout: Layout::Horizontal,
        content: ContentKind::Loading,
        message: Some("Fetching data..."),
        steps: &[
            Step::Text("Fetching Projects..."),
            Step::Text("Fetching Managers..."),
            Step::Text("Fetching Leads..."),
            Step::Text("Fetching Roles..."),
            Step::Hide,
        ],
    },
    Scenario {
        label: "Light vertical",
        theme: Theme::Light,
        layout: Layout::Vertical,
        content: ContentKind::Loading,
        message: None,
        steps: &[Step::Hide],
    },
    Scenario {
        label: "Dark horizontal",
        theme: Theme::Dark,
        layout: Layout::Horizontal,
        content: ContentKind::Loading,
        message: None,
        steps: &[Step::Hide],
    },
    Scenario {
        label: "Dark vertical",
        theme: Theme::Dark,
        layout: Layout::Vertical,
        content: ContentKind::Loading,
        message: None,
        steps: &[Step::Hide],
    },
    Scenario {
        label: "Hide with success",
        theme: Theme::Dark,
        layout: Layout::Vertical,
        content: ContentKind::Loading,
        message: None,
        steps: &[Step::Result {
            success: true,
            message: "Done",
        }],
    },
    Scenario {
        label: "Hide with failure",
        theme: Theme::Light,
        layout: Layout::Vertical,
        content: ContentKind::Loading,
        message: None,
        steps: &[Step::Result {
            success: false,
            message: "Failed",
        }],
    },
    Scenario {
        label: "Info",
        theme: Theme::Dark,
        layout: Layout::Horizontal,
        content: ContentKind::Info,
        message: Some("Good Morning"),
        steps: &[Step::Hide],
    },
];

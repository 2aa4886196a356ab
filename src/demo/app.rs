//! Demo window
//!
//! One button per scenario. The HUD is painted over the window and blocks
//! the buttons while it is shown.

use eframe::egui;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

use simple_hud::config::HudConfig;
use simple_hud::host::EguiHost;
use simple_hud::{Completion, HudHandle, HudPainter, OverlayController};

use crate::demo::{Scenario, SCENARIOS, STEP_DELAY};

type EventLog = Arc<Mutex<Vec<String>>>;

/// Lines of the event log shown under the buttons
const LOG_LINES: usize = 12;

pub struct DemoApp {
    controller: OverlayController<EguiHost>,
    config: HudConfig,
    painter: HudPainter,
    log: EventLog,
}

impl DemoApp {
    pub fn new(config: &HudConfig) -> Self {
        let controller = OverlayController::new(EguiHost::new(), config);
        if let Err(e) = simple_hud::install(controller.handle()) {
            warn!("{}", e);
        }

        Self {
            controller,
            config: config.clone(),
            painter: HudPainter::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create eframe options for the demo window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 760.0])
                .with_min_inner_size([320.0, 480.0])
                .with_title("SimpleHUD"),
            ..Default::default()
        }
    }

    fn start(&self, scenario: &'static Scenario, ctx: &egui::Context) {
        info!("Starting scenario: {}", scenario.label);
        push_log(&self.log, format!("{}: show", scenario.label));

        let hud = self.controller.handle();
        let ctx = ctx.clone();
        let log = Arc::clone(&self.log);
        let request = scenario
            .request(&self.config)
            .on_shown(move || run_steps(scenario, hud, ctx, log));
        simple_hud::show(request);
    }
}

/// Append to the log, keeping only the lines that are shown
fn push_log(log: &EventLog, line: String) {
    let mut log = log.lock();
    log.push(line);
    let excess = log.len().saturating_sub(LOG_LINES);
    log.drain(..excess);
}

/// Play the scenario's steps on a background thread
fn run_steps(scenario: &'static Scenario, hud: HudHandle, ctx: egui::Context, log: EventLog) {
    push_log(&log, format!("{}: shown", scenario.label));

    thread::spawn(move || {
        for (i, step) in scenario.steps.iter().enumerate() {
            thread::sleep(STEP_DELAY);

            let on_hidden = (i + 1 == scenario.steps.len()).then(|| {
                let log = Arc::clone(&log);
                Box::new(move || push_log(&log, format!("{}: hidden", scenario.label))) as Completion
            });
            if let Err(e) = hud.send(step.command(on_hidden)) {
                warn!("Scenario {} stopped: {}", scenario.label, e);
                return;
            }
            ctx.request_repaint();
        }
    });
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.host_mut().sync(ctx);
        self.controller.tick(Instant::now());

        let enabled = self.controller.host().interaction_enabled();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("SimpleHUD");
            ui.add_space(12.0);

            ui.add_enabled_ui(enabled, |ui| {
                for scenario in SCENARIOS.iter() {
                    if ui.button(scenario.label).clicked() {
                        self.start(scenario, ctx);
                    }
                }
            });

            ui.separator();
            for line in self.log.lock().iter().rev().take(LOG_LINES) {
                ui.label(line);
            }
        });

        let frame = self.controller.frame();
        if let Some(frame) = &frame {
            self.painter.paint(ctx, frame);
        }

        let spinning = frame.map(|f| f.spinner.is_some()).unwrap_or(false);
        if self.controller.is_animating() || spinning {
            ctx.request_repaint();
        } else if let Some(due) = self.controller.next_timer() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }
}

//! Headless run of the demo scenarios
//!
//! Drives the controller against an in-memory host with a virtual clock and
//! prints one JSON line per observable change.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::time::{Duration, Instant};

use simple_hud::config::HudConfig;
use simple_hud::host::HeadlessHost;
use simple_hud::{HudStatus, OverlayController, Phase};

use crate::demo::{Scenario, SCENARIOS, STEP_DELAY};

const FRAME: Duration = Duration::from_millis(50);
const SETTLE_LIMIT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct ScriptLine<'a> {
    t_ms: u64,
    scenario: &'a str,
    status: HudStatus,
}

struct Script<W> {
    controller: OverlayController<HeadlessHost>,
    config: HudConfig,
    start: Instant,
    clock: Instant,
    last: Option<(Phase, Option<String>)>,
    out: W,
}

impl<W: Write> Script<W> {
    fn new(config: &HudConfig, out: W) -> Self {
        let host = HeadlessHost::with_screen(egui::vec2(390.0, 844.0));
        let mut controller = OverlayController::new(host, config);
        let start = Instant::now();
        controller.tick(start);
        Self {
            controller,
            config: config.clone(),
            start,
            clock: start,
            last: None,
            out,
        }
    }

    fn run(&mut self, scenario: &Scenario) -> Result<()> {
        self.controller.show(scenario.request(&self.config));
        self.report(scenario)?;

        for step in scenario.steps {
            self.advance(scenario, STEP_DELAY)?;
            self.controller.apply(step.command(None));
            self.report(scenario)?;
        }

        let deadline = self.clock + SETTLE_LIMIT;
        while !(self.controller.is_idle() && self.controller.phase() == Phase::Hidden) && self.clock < deadline {
            self.advance(scenario, FRAME)?;
        }
        Ok(())
    }

    fn advance(&mut self, scenario: &Scenario, duration: Duration) -> Result<()> {
        let until = self.clock + duration;
        while self.clock < until {
            self.clock = (self.clock + FRAME).min(until);
            self.controller.tick(self.clock);
            self.report(scenario)?;
        }
        Ok(())
    }

    /// Print the status when the phase or the text changed
    fn report(&mut self, scenario: &Scenario) -> Result<()> {
        let status = self.controller.status();
        let key = (status.phase, status.message.clone());
        if self.last.as_ref() == Some(&key) {
            return Ok(());
        }
        self.last = Some(key);

        let line = ScriptLine {
            t_ms: self.clock.duration_since(self.start).as_millis() as u64,
            scenario: scenario.label,
            status,
        };
        writeln!(self.out, "{}", serde_json::to_string(&line)?)?;
        Ok(())
    }
}

/// Run every scenario, writing JSON lines to `out`
pub fn run_script(config: &HudConfig, out: impl Write) -> Result<()> {
    let mut script = Script::new(config, out);
    for scenario in SCENARIOS.iter() {
        script.run(scenario)?;
    }
    script.out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run_script(&HudConfig::default(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_script_walks_every_scenario() {
        let lines = lines();

        for scenario in SCENARIOS.iter() {
            let phases: Vec<&str> = lines
                .iter()
                .filter(|l| l["scenario"] == scenario.label)
                .filter_map(|l| l["status"]["phase"].as_str())
                .collect();
            assert_eq!(phases.first(), Some(&"showing"), "{}", scenario.label);
            assert_eq!(phases.last(), Some(&"hidden"), "{}", scenario.label);
        }
    }

    #[test]
    fn test_script_reports_result_dwell() {
        let lines = lines();
        let success: Vec<&serde_json::Value> = lines
            .iter()
            .filter(|l| l["scenario"] == "Hide with success")
            .collect();

        let transient = success
            .iter()
            .find(|l| l["status"]["phase"] == "transient")
            .unwrap();
        assert_eq!(transient["status"]["glyph"], "success");
        assert_eq!(transient["status"]["message"], "Done");
        assert!(success.iter().any(|l| l["status"]["phase"] == "hiding"));
    }

    #[test]
    fn test_script_reports_text_updates() {
        let lines = lines();
        let messages: Vec<&str> = lines
            .iter()
            .filter(|l| l["scenario"] == "Light horizontal")
            .filter_map(|l| l["status"]["message"].as_str())
            .collect();

        assert!(messages.contains(&"Fetching Projects..."));
        assert!(messages.contains(&"Fetching Roles..."));
    }
}

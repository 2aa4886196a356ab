//! HUD Configuration
//!
//! Animation timings, panel appearance and `show` defaults stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::overlay::{ContentKind, Layout, Theme};
use crate::shared::{ShowRequest, DEFAULT_MESSAGE};

/// HUD settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Animation timings
    pub animation: AnimationConfig,
    /// Panel appearance
    pub appearance: AppearanceConfig,
    /// Parameters used by `show` when the caller gives none
    pub defaults: DefaultsConfig,
}

impl HudConfig {
    /// Build a show request from the configured defaults
    pub fn show_request(&self) -> ShowRequest {
        ShowRequest::new()
            .theme(self.defaults.theme)
            .layout(self.defaults.layout)
            .content(ContentKind::Loading)
            .message(self.defaults.message.clone())
    }
}

/// Animation timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Pop-in, pop-out and text cross-fade duration in milliseconds
    pub duration_ms: u64,
    /// How long a success/error result stays up before hiding, in milliseconds
    pub dwell_ms: u64,
    /// Panel scale at the start of the pop-in and the end of the pop-out
    pub initial_scale: f32,
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            dwell_ms: 800,
            initial_scale: 0.1,
        }
    }
}

/// Panel appearance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Panel corner radius in points
    pub corner_radius: f32,
    /// Gap between the indicator and the text
    pub spacing: f32,
    /// Text size in points
    pub font_size: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            corner_radius: 20.0,
            spacing: 10.0,
            font_size: 20.0,
        }
    }
}

/// Default `show` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub theme: Theme,
    pub layout: Layout,
    pub message: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            layout: Layout::Horizontal,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<HudConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: HudConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &HudConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "simplehud", "SimpleHUD")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_hud_config() {
        let config = HudConfig::default();

        assert_eq!(config.animation.duration(), Duration::from_millis(300));
        assert_eq!(config.animation.dwell(), Duration::from_millis(800));
        assert!((config.animation.initial_scale - 0.1).abs() < 0.001);

        assert!((config.appearance.corner_radius - 20.0).abs() < 0.01);
        assert!((config.appearance.spacing - 10.0).abs() < 0.01);
        assert!((config.appearance.font_size - 20.0).abs() < 0.01);

        assert_eq!(config.defaults.theme, Theme::Dark);
        assert_eq!(config.defaults.layout, Layout::Horizontal);
        assert_eq!(config.defaults.message, "Loading...");
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = HudConfig::default();
        config.animation.dwell_ms = 1500;
        config.defaults.theme = Theme::Light;
        config.defaults.layout = Layout::Vertical;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: HudConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.animation.dwell_ms, 1500);
        assert_eq!(parsed.defaults.theme, Theme::Light);
        assert_eq!(parsed.defaults.layout, Layout::Vertical);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: HudConfig = toml::from_str("[defaults]\ntheme = \"light\"\n").unwrap();

        assert_eq!(parsed.defaults.theme, Theme::Light);
        assert_eq!(parsed.defaults.layout, Layout::Horizontal);
        assert_eq!(parsed.defaults.message, "Loading...");
        assert_eq!(parsed.animation.duration_ms, 300);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = HudConfig::default();
        config.defaults.message = "Syncing...".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.defaults.message, "Syncing...");
        assert_eq!(loaded.animation.duration_ms, config.animation.duration_ms);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/hud.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_show_request_from_defaults() {
        let mut config = HudConfig::default();
        config.defaults.layout = Layout::Vertical;

        let request = config.show_request();
        assert_eq!(request.layout, Layout::Vertical);
        assert_eq!(request.theme, Theme::Dark);
        assert_eq!(request.content, ContentKind::Loading);
        assert_eq!(request.message.as_deref(), Some("Loading..."));
    }
}

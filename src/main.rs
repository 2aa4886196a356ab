//! SimpleHUD demo
//!
//! Opens a window with one button per demo scenario, renders the glyphs to
//! PNG files, or runs the scenarios headless.

mod demo;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use simple_hud::config::{self, HudConfig};
use simple_hud::icon::{self, GlyphKind};
use simple_hud::Theme;

use crate::demo::app::DemoApp;

const MIN_SCALE: f32 = 0.5;

/// SimpleHUD - singleton status overlay demo
#[derive(Parser, Debug)]
#[command(name = "simple-hud")]
#[command(about = "Demo of a singleton status HUD with spinner and result glyphs")]
struct Args {
    /// Configuration file (default: hud.toml in the config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render every glyph as PNG into DIR and exit
    #[arg(long, value_name = "DIR")]
    render_glyphs: Option<PathBuf>,

    /// Pixel density used by --render-glyphs
    #[arg(long, default_value = "3.0", value_parser = parse_scale)]
    scale: f32,

    /// Run the demo scenarios headless, printing status as JSON lines
    #[arg(long)]
    script: bool,
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for --script output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = load_or_default_config(args.config.as_deref())?;

    if let Some(dir) = args.render_glyphs {
        return render_glyphs(&dir, args.scale);
    }

    if args.script {
        return demo::script::run_script(&config, std::io::stdout().lock());
    }

    info!("SimpleHUD demo starting...");
    eframe::run_native(
        "SimpleHUD",
        DemoApp::options(),
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Demo window failed: {}", e))?;

    info!("SimpleHUD demo shutdown complete");
    Ok(())
}

/// Load the given configuration file, or hud.toml from the config directory
fn load_or_default_config(path: Option<&Path>) -> Result<HudConfig> {
    if let Some(path) = path {
        let config = config::load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_dir) = config::get_config_dir() {
        let config_path = config_dir.join("hud.toml");
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return Ok(config);
                }
                Err(e) => warn!("Ignoring {:?}: {}", config_path, e),
            }
        }
    }

    info!("Using default configuration");
    Ok(HudConfig::default())
}

/// Accept densities the glyph renderer draws as asked
fn parse_scale(value: &str) -> Result<f32, String> {
    let scale: f32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if (MIN_SCALE..=icon::MAX_SCALE).contains(&scale) {
        Ok(scale)
    } else {
        Err(format!("scale must be between {} and {}", MIN_SCALE, icon::MAX_SCALE))
    }
}

fn render_glyphs(dir: &Path, scale: f32) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    for kind in GlyphKind::ALL {
        for theme in [Theme::Light, Theme::Dark] {
            let image = icon::render_glyph(kind, theme.foreground(), scale);
            let path = dir.join(format!("{}_{}@{}x.png", kind.name(), theme.name(), scale));
            icon::save_png(&image, &path)?;
            info!("Wrote {:?} ({}x{})", path, image.width(), image.height());
        }
    }

    Ok(())
}

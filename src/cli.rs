use std::path::PathBuf;

use clap::Parser;

use tui_spin::config::Settings;

/// Rotating 3D shapes rendered as shaded ASCII in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Scene to show: cube, donut, pyramid or quad.
    #[arg(long)]
    pub scene: Option<String>,

    /// JSON config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds to run; 0 runs until quit.
    #[arg(long)]
    pub duration: Option<u64>,

    /// Stop after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Milliseconds between frames.
    #[arg(long)]
    pub frame_ms: Option<u64>,

    /// Foreground color, `#RRGGBB` or `0xRRGGBB`.
    #[arg(long)]
    pub color: Option<String>,

    /// Stream frames to stdout instead of taking over the terminal.
    #[arg(long, default_value_t = false)]
    pub plain: bool,

    /// Hide the status line.
    #[arg(long, default_value_t = false)]
    pub no_status: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The command-line layer of the run settings.
    pub fn settings(&self) -> Settings {
        Settings {
            scene: self.scene.clone(),
            duration_secs: self.duration,
            frames: self.frames,
            frame_ms: self.frame_ms,
            color: self.color.clone(),
            ..Settings::default()
        }
    }

    /// Defaults, then the config file, then `SPIN_*` variables, then flags.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(file.merge(Settings::from_env()).merge(self.settings()))
    }
}

//! Command-line argument parsing for Skyward.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Skyward command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyward", about = "Procedural day/night sky driver")]
pub struct CliArgs {
    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Simulated milliseconds between frames.
    #[arg(long)]
    pub frame_ms: Option<f64>,

    /// Wall-clock timestamp of the first frame in milliseconds (default: now).
    #[arg(long)]
    pub start_ms: Option<f64>,

    /// Skip the headless GPU uniform upload.
    #[arg(long)]
    pub no_gpu: bool,

    /// Sky light speed multiplier (overrides the `skyLight` component).
    #[arg(long)]
    pub speed: Option<f64>,

    /// JSON file with the startup component list.
    #[arg(long)]
    pub components: Option<PathBuf>,

    /// Directory holding the sky textures.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frames) = args.frames {
            self.demo.frames = frames;
        }
        if let Some(ms) = args.frame_ms {
            self.demo.frame_ms = ms;
        }
        if let Some(start) = args.start_ms {
            self.demo.start_ms = Some(start);
        }
        if args.no_gpu {
            self.demo.gpu_upload = false;
        }
        if let Some(speed) = args.speed {
            self.sky.speed_override = Some(speed);
        }
        if let Some(ref path) = args.components {
            self.demo.components_path = Some(path.clone());
        }
        if let Some(ref path) = args.assets {
            self.assets.base_path = path.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            frames: Some(10),
            speed: Some(2.5),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.demo.frames, 10);
        assert_eq!(config.sky.speed_override, Some(2.5));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.demo.frame_ms, 16.0);
        assert_eq!(config.sky.sky_box_radius, 10_000.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "skyward",
            "--frames",
            "5",
            "--components",
            "scene.json",
        ]);
        assert_eq!(args.frames, Some(5));
        assert_eq!(args.components, Some(PathBuf::from("scene.json")));
        assert!(args.speed.is_none());
        assert!(!args.no_gpu);
    }

    #[test]
    fn test_cli_start_time_and_gpu_switch() {
        let args = CliArgs::parse_from(["skyward", "--start-ms", "1700000000000", "--no-gpu"]);
        let mut config = Config::default();
        assert!(config.demo.start_ms.is_none());
        assert!(config.demo.gpu_upload);

        config.apply_cli_overrides(&args);
        assert_eq!(config.demo.start_ms, Some(1.7e12));
        assert!(!config.demo.gpu_upload);
    }
}

//! Game settings and preferences
//!
//! Loaded from an optional JSON file, then overridden by command-line flags
//! parsed with clap.
//! Anything missing or unreadable falls back to defaults with a warning.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::sim::AiConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Match seed (wall clock when absent)
    pub seed: Option<u64>,
    /// Let the planner play Side Two
    pub ai_for_p2: bool,
    /// Ticks per second; 0 runs as fast as possible
    pub tick_rate: u32,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,

    // === Text output ===
    /// Draw a frame every N ticks (0 = status lines only)
    pub render_every: u64,
    pub view_cols: usize,
    pub view_rows: usize,

    /// Planner tuning
    pub ai: AiConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            ai_for_p2: false,
            tick_rate: TICK_RATE,
            max_ticks: Some(60 * u64::from(TICK_RATE)),

            render_every: 0,
            view_cols: 96,
            view_rows: 27,

            ai: AiConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, or defaults when there is none
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The configured seed, or one taken from the clock
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

/// Command-line overrides, applied on top of the settings file
#[derive(Debug, Parser)]
#[command(name = "pocket-artillery")]
#[command(about = "Headless two-player artillery match")]
#[command(version)]
pub struct Cli {
    /// JSON settings file to start from
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Let the planner play Side Two
    #[arg(long)]
    pub ai: bool,

    /// Match seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Draw a frame every N ticks
    #[arg(long)]
    pub render: Option<u64>,

    /// Run as fast as possible
    #[arg(long)]
    pub unpaced: bool,
}

impl Cli {
    /// Load the settings file (if any) and apply the flags over it
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::load(self.config.as_deref());
        self.apply(&mut settings);
        settings
    }

    fn apply(&self, settings: &mut Settings) {
        if self.ai {
            settings.ai_for_p2 = true;
        }
        if self.unpaced {
            settings.tick_rate = 0;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.ticks.is_some() {
            settings.max_ticks = self.ticks;
        }
        if let Some(every) = self.render {
            settings.render_every = every;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "ai_for_p2": true, "ai": { "candidates": 3 } }"#)
            .unwrap();
        assert!(settings.ai_for_p2);
        assert_eq!(settings.ai.candidates, 3);
        assert_eq!(settings.ai.max_steps, 240);
        assert_eq!(settings.tick_rate, TICK_RATE);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "pocket-artillery",
            "--ai",
            "--seed",
            "42",
            "--ticks",
            "900",
            "--render",
            "30",
            "--unpaced",
        ])
        .unwrap();
        let settings = cli.settings();
        assert!(settings.ai_for_p2);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_ticks, Some(900));
        assert_eq!(settings.render_every, 30);
        assert_eq!(settings.tick_rate, 0);
        assert_eq!(settings.resolved_seed(), 42);
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::try_parse_from(["pocket-artillery"]).unwrap();
        assert_eq!(cli.settings(), Settings::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("pocket-artillery-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 7, "render_every": 5, "ai_for_p2": true }"#).unwrap();
        let cli = Cli::try_parse_from([
            "pocket-artillery",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "9",
        ])
        .unwrap();
        let settings = cli.settings();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.render_every, 5);
        assert!(settings.ai_for_p2);
    }

    #[test]
    fn test_bad_flag_values_are_rejected() {
        assert!(Cli::try_parse_from(["pocket-artillery", "--seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["pocket-artillery", "--render"]).is_err());
        assert!(Cli::try_parse_from(["pocket-artillery", "--bogus"]).is_err());
    }
}

//! Runtime settings
//!
//! Read from a JSON file; every field falls back to its default, and a
//! missing or broken file just means default settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_FRAME_DT};
use crate::sim::Playfield;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Simulation ===
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
    /// Frame times above this are clamped (s)
    pub max_frame_dt: f32,

    // === Persistence ===
    pub score_log: PathBuf,

    // === Audio ===
    pub sound_effects: bool,

    // === Headless runner ===
    /// Frames to simulate before giving up on a session
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            max_frame_dt: MAX_FRAME_DT,
            score_log: PathBuf::from("saved/scores.jsonl"),
            sound_effects: true,
            demo_frames: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Load from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }

    /// Clamp a host frame time into [0, max_frame_dt]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt.max(0.0))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.playfield(), Playfield::new(1280.0, 720.0));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "width": 1920, "seed": 7 }"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.width, 1920.0);
        assert_eq!(settings.height, DEFAULT_HEIGHT);
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ width: ").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_clamp_dt() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_dt(0.016), 0.016);
        assert_eq!(settings.clamp_dt(2.0), MAX_FRAME_DT);
        assert_eq!(settings.clamp_dt(-1.0), 0.0);
        assert_eq!(settings.clamp_dt(f32::NAN), 0.0);
    }
}

//! Viewer configuration resource.
//!
//! Settings for the animation viewer loaded from an INI file. Defaults keep
//! the viewer usable without any file on disk.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [animation]
//! frame_interval_ms = 100
//! looped = true
//! default_state = idle
//! scale = 4
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;
const DEFAULT_LOOPED: bool = true;
const DEFAULT_SCALE: f32 = 4.0;
const DEFAULT_CONFIG_PATH: &str = "./stateanim.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    /// Milliseconds each animation frame is shown.
    pub frame_interval_ms: u64,
    /// Whether loaded animations restart after their last frame.
    pub looped: bool,
    /// State shown first, as `segment/segment`.
    pub default_state: Option<String>,
    /// Sprite magnification when drawing.
    pub scale: f32,
    pub config_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            looped: DEFAULT_LOOPED,
            default_state: None,
            scale: DEFAULT_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Frame interval in seconds, the unit animations run on.
    pub fn frame_interval(&self) -> f32 {
        self.frame_interval_ms as f32 / 1000.0
    }

    /// Load settings from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Same as [`load_from_file`](Self::load_from_file) but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [animation] section
        if let Some(ms) = config.getuint("animation", "frame_interval_ms").ok().flatten() {
            self.frame_interval_ms = ms;
        }
        if let Some(looped) = config.getbool("animation", "looped").ok().flatten() {
            self.looped = looped;
        }
        if let Some(state) = config.get("animation", "default_state") {
            if !state.is_empty() {
                self.default_state = Some(state);
            }
        }
        if let Some(scale) = config.getfloat("animation", "scale").ok().flatten() {
            self.scale = scale as f32;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, interval={}ms, looped={}, default={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.frame_interval_ms,
            self.looped,
            self.default_state
        );
    }

    /// Apply command line values on top of the file settings.
    pub fn apply_overrides(
        &mut self,
        default_state: Option<String>,
        frame_interval_ms: Option<u64>,
        no_loop: bool,
    ) {
        if let Some(state) = default_state {
            self.default_state = Some(state);
        }
        if let Some(ms) = frame_interval_ms {
            self.frame_interval_ms = ms;
        }
        if no_loop {
            self.looped = false;
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set(
            "animation",
            "frame_interval_ms",
            Some(self.frame_interval_ms.to_string()),
        );
        config.set("animation", "looped", Some(self.looped.to_string()));
        config.set("animation", "default_state", self.default_state.clone());
        config.set("animation", "scale", Some(self.scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::new();
        assert_eq!(config.frame_interval_ms, 100);
        assert!((config.frame_interval() - 0.1).abs() < 1e-6);
        assert!(config.looped);
        assert_eq!(config.default_state, None);
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str("[animation]\nframe_interval_ms = 250\ndefault_state = walking/right\n")
            .unwrap();
        assert_eq!(config.frame_interval_ms, 250);
        assert_eq!(config.default_state.as_deref(), Some("walking/right"));
        assert_eq!(config.window_width, 800);
        assert!(config.looped);
    }

    #[test]
    fn test_window_and_loop_settings() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str("[window]\nwidth = 320\nheight = 200\n[animation]\nlooped = false\nscale = 2.5\n")
            .unwrap();
        assert_eq!((config.window_width, config.window_height), (320, 200));
        assert!(!config.looped);
        assert!((config.scale - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = ViewerConfig::with_path("/nonexistent/stateanim.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, ViewerConfig::with_path("/nonexistent/stateanim.ini"));
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = ViewerConfig::new();
        config.load_from_str("[animation]\nframe_interval_ms = 250\ndefault_state = idle\n").unwrap();
        config.apply_overrides(None, Some(40), true);
        assert_eq!(config.frame_interval_ms, 40);
        assert_eq!(config.default_state.as_deref(), Some("idle"));
        assert!(!config.looped);
    }

    #[test]
    fn test_saved_overrides_load_back() {
        let path = std::env::temp_dir().join(format!("stateanim-ovr-{}.ini", std::process::id()));
        let mut saved = ViewerConfig::with_path(&path);
        saved.apply_overrides(Some("walking/right".to_string()), Some(120), true);
        saved.save_to_file().unwrap();

        let mut loaded = ViewerConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("stateanim-{}.ini", std::process::id()));
        let mut saved = ViewerConfig::with_path(&path);
        saved.frame_interval_ms = 80;
        saved.default_state = Some("idle".to_string());
        saved.save_to_file().unwrap();

        let mut loaded = ViewerConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.frame_interval_ms, 80);
        assert_eq!(loaded.default_state.as_deref(), Some("idle"));
    }
}

use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ARCPLAY__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ARCPLAY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.poll_interval_ms == 0 {
            return Err("playback.poll_interval_ms must be >= 1".to_string());
        }
        let gap = self.seek.gap_degrees;
        if !(0.0..360.0).contains(&gap) {
            return Err("seek.gap_degrees must be in [0, 360)".to_string());
        }
        if !self.seek.start_angle_degrees.is_finite() {
            return Err("seek.start_angle_degrees must be a finite number".to_string());
        }
        if self.seek.ring_tolerance < 0.0 || self.seek.touch_slop < 0.0 {
            return Err("seek.ring_tolerance and seek.touch_slop must be >= 0".to_string());
        }
        if self.seek.center_inset <= self.seek.ring_tolerance {
            return Err("seek.center_inset must be larger than seek.ring_tolerance".to_string());
        }
        Ok(())
    }

    /// Render the default settings as a TOML document.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }
}

/// Resolve the config path from `ARCPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ARCPLAY_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/arcplay/config.toml`
/// or `~/.config/arcplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("arcplay").join("config.toml"))
}

/// Compute the default log file path under `$XDG_STATE_HOME/arcplay/arcplay.log`
/// or `~/.local/state/arcplay/arcplay.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("arcplay").join("arcplay.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        return Some(PathBuf::from(xdg));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part))
    })
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{ConfigureError, SessionDurations};
use crate::engine::{SessionEngine, DEFAULT_TICK_INTERVAL_MS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse TOML configuration: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {source}")]
    Serialize {
        #[from]
        source: toml::ser::Error,
    },

    #[error("invalid timer configuration: {source}")]
    Invalid {
        #[from]
        source: ConfigureError,
    },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub timer: TimerConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub pomodoro_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    pub long_break_after: u32,
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub sound_enabled: bool,
    pub urgency: NotificationUrgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationUrgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Default for TimerConfig {
    fn default() -> Self {
        let durations = SessionDurations::default();
        Self {
            pomodoro_minutes: durations.minutes_for(crate::PhaseKind::Pomodoro),
            short_break_minutes: durations.minutes_for(crate::PhaseKind::ShortBreak),
            long_break_minutes: durations.minutes_for(crate::PhaseKind::LongBreak),
            long_break_after: durations.long_break_after(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl TimerConfig {
    pub fn durations(&self) -> Result<SessionDurations, ConfigureError> {
        SessionDurations::new(
            self.pomodoro_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.long_break_after,
        )
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_enabled: true,
            urgency: NotificationUrgency::Normal,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.durations()?;
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Builds the engine described by the `[timer]` section.
    pub fn build_engine(&self) -> Result<SessionEngine, ConfigError> {
        self.validate()?;
        Ok(SessionEngine::new(
            self.timer.durations()?,
            self.timer.tick_interval_ms,
        ))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pomo")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhaseKind;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();

        assert_eq!(config.timer.pomodoro_minutes, 30);
        assert_eq!(config.timer.short_break_minutes, 6);
        assert_eq!(config.timer.long_break_minutes, 60);
        assert_eq!(config.timer.long_break_after, 6);
        assert_eq!(config.timer.tick_interval_ms, 500);
        assert!(config.notifications.enabled);
        assert!(config.notifications.sound_enabled);
        assert_eq!(config.notifications.urgency, NotificationUrgency::Normal);
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [timer]
            pomodoro_minutes = 25
        "#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.timer.pomodoro_minutes, 25);
        assert_eq!(config.timer.short_break_minutes, 6);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [timer]
            pomodoro_minutes = 25
            short_break_minutes = 5
            long_break_minutes = 15
            long_break_after = 4
            tick_interval_ms = 1000

            [notifications]
            enabled = false
            sound_enabled = false
            urgency = "critical"
        "#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.timer.long_break_after, 4);
        assert_eq!(config.timer.tick_interval_ms, 1000);
        assert!(!config.notifications.enabled);
        assert!(!config.notifications.sound_enabled);
        assert_eq!(config.notifications.urgency, NotificationUrgency::Critical);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let toml = r#"
            [timer]
            short_break_minutes = 0
        "#;

        let result = Config::parse(toml);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                source: ConfigureError::DurationOutOfRange {
                    phase: PhaseKind::ShortBreak,
                    ..
                }
            })
        ));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let toml = r#"
            [timer]
            tick_interval_ms = 0
        "#;

        assert!(matches!(
            Config::parse(toml),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse("[timer"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn build_engine_uses_timer_section() {
        let config = Config::parse(
            r#"
            [timer]
            pomodoro_minutes = 45
            long_break_after = 3
        "#,
        )
        .unwrap();

        let engine = config.build_engine().unwrap();

        assert_eq!(engine.snapshot().remaining_display, "45:00");
        assert_eq!(engine.pomodoros_until_long_break(), 3);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("pomo-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.timer.pomodoro_minutes, 30);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = std::env::temp_dir()
            .join(format!("pomo-config-test-{}", std::process::id()))
            .join("config.toml");
        let mut config = Config::default();
        config.timer.long_break_minutes = 20;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.timer.long_break_minutes, 20);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}

//! Configuration management for askaway.
//!
//! Settings live in a JSON file in the platform data directory and are split into
//! two optional sections:
//!
//! - **Server**: where the activity-tracking server listens.
//! - **Watcher**: poll timing and the thresholds that decide which absences are
//!   worth asking about.
//!
//! A missing file or section means defaults. The `watch` command can override
//! the watcher timing from the command line without touching the file.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use askaway::libs::config::Config;
//!
//! // Load existing configuration or defaults
//! let config = Config::read()?;
//! let watcher = config.watcher.unwrap_or_default();
//! println!("Polling every {}s", watcher.poll_interval_seconds);
//!
//! // Run interactive configuration setup
//! Config::init()?.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::dedup::{DEFAULT_CAPACITY, DEFAULT_OVERLAP_THRESHOLD};
use super::event::seconds_to_duration;
use super::reconcile::Thresholds;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Upper bound for any watcher setting given in seconds (100 years).
pub const MAX_SETTING_SECONDS: f64 = 100.0 * 365.25 * 24.0 * 60.0 * 60.0;

/// Represents a configurable module in the application.
///
/// Used by the setup wizard to list the sections a user can edit.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Activity server connection settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the production server, e.g. `http://localhost:5600`.
    pub api_url: String,

    /// Base URL used when the watcher runs with `--testing`.
    pub testing_api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            api_url: "http://localhost:5600".to_string(),
            testing_api_url: "http://localhost:5666".to_string(),
        }
    }
}

/// Watcher timing and reconciliation thresholds.
///
/// ## Timing Configuration
///
/// - **Poll interval**: how long to sleep between polls of the server.
/// - **Recency window**: absences that ended longer ago than this are no longer
///   offered, even if they were never answered.
/// - **Minimum duration**: absences must be strictly longer than this.
///
/// ## Noise Handling
///
/// - **Heartbeat pulse**: two absences split by less activity than this (a mouse
///   bump, say) are treated as one. Zero disables merging.
/// - **Dedup overlap threshold**: fraction of a candidate that must be covered by
///   an already-answered absence for it to count as the same one.
/// - **Dedup window capacity**: how many answered absences are remembered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WatcherConfig {
    pub recency_window_seconds: f64,
    pub poll_interval_seconds: f64,
    pub min_duration_seconds: f64,
    pub heartbeat_pulse_seconds: f64,
    pub dedup_overlap_threshold: f64,
    pub dedup_window_capacity: usize,
}

impl Default for WatcherConfig {
    /// Default values:
    /// - 10 minute recency window
    /// - 5 second poll interval
    /// - 5 minute minimum absence
    /// - 10 second heartbeat pulse
    /// - 0.95 overlap threshold over the last 10 answers
    fn default() -> Self {
        WatcherConfig {
            recency_window_seconds: 600.0,
            poll_interval_seconds: 5.0,
            min_duration_seconds: 300.0,
            heartbeat_pulse_seconds: 10.0,
            dedup_overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            dedup_window_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl WatcherConfig {
    /// Reconciliation thresholds derived from the configured seconds.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            recency_window: seconds_to_duration(self.recency_window_seconds),
            min_duration: seconds_to_duration(self.min_duration_seconds),
            heartbeat_pulse: seconds_to_duration(self.heartbeat_pulse_seconds),
        }
    }

    /// Sleep between polls. Values that are not a valid duration fall back to the
    /// default; [`WatcherConfig::validate`] rejects them up front.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::try_from_secs_f64(self.poll_interval_seconds)
            .unwrap_or_else(|_| std::time::Duration::from_secs_f64(WatcherConfig::default().poll_interval_seconds))
    }

    /// Checks that every setting is usable.
    ///
    /// Seconds must be finite, non-negative and at most a century. The overlap
    /// threshold must lie strictly between 0 and 1 and the window must hold at
    /// least one answer.
    ///
    /// # Errors
    ///
    /// Names the first setting that is out of range.
    pub fn validate(&self) -> Result<()> {
        let seconds = [
            ("recency_window_seconds", self.recency_window_seconds),
            ("poll_interval_seconds", self.poll_interval_seconds),
            ("min_duration_seconds", self.min_duration_seconds),
            ("heartbeat_pulse_seconds", self.heartbeat_pulse_seconds),
        ];
        for (name, value) in seconds {
            if !(value.is_finite() && (0.0..=MAX_SETTING_SECONDS).contains(&value)) {
                msg_bail_anyhow!(Message::InvalidWatcherSetting {
                    name: name.to_string(),
                    value: value.to_string(),
                    expected: format!("a number of seconds between 0 and {}", MAX_SETTING_SECONDS),
                });
            }
        }

        let threshold = self.dedup_overlap_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            msg_bail_anyhow!(Message::InvalidWatcherSetting {
                name: "dedup_overlap_threshold".to_string(),
                value: threshold.to_string(),
                expected: "a fraction strictly between 0 and 1".to_string(),
            });
        }

        if self.dedup_window_capacity < 1 {
            msg_bail_anyhow!(Message::InvalidWatcherSetting {
                name: "dedup_window_capacity".to_string(),
                value: self.dedup_window_capacity.to_string(),
                expected: "at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Main configuration container.
///
/// Unconfigured sections are omitted from the JSON output and fall back to
/// their defaults when read.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watcher: Option<WatcherConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// ## File Location
    ///
    /// - **Windows**: `%LOCALAPPDATA%\askaway\askaway\config.json`
    /// - **macOS**: `~/Library/Application Support/askaway/askaway/config.json`
    /// - **Linux**: `~/.local/share/askaway/askaway/config.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed. A
    /// missing file is not an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs an interactive configuration setup wizard.
    ///
    /// Starts from the current configuration, lets the user pick which sections
    /// to edit, and prompts for each value with the current one pre-filled.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal input cannot be collected.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: "Server".to_string(),
            },
            ConfigModule {
                key: "watcher".to_string(),
                name: "Watcher".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                        testing_api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerTestingApiUrl.to_string())
                            .default(default.testing_api_url)
                            .interact_text()?,
                    });
                }
                "watcher" => {
                    let default = config.watcher.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleWatcher);
                    config.watcher = Some(WatcherConfig {
                        recency_window_seconds: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRecencyWindow.to_string())
                            .default(default.recency_window_seconds)
                            .interact_text()?,
                        poll_interval_seconds: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval_seconds)
                            .interact_text()?,
                        min_duration_seconds: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMinDuration.to_string())
                            .default(default.min_duration_seconds)
                            .interact_text()?,
                        heartbeat_pulse_seconds: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptHeartbeatPulse.to_string())
                            .default(default.heartbeat_pulse_seconds)
                            .interact_text()?,
                        dedup_overlap_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptOverlapThreshold.to_string())
                            .default(default.dedup_overlap_threshold)
                            .interact_text()?,
                        dedup_window_capacity: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWindowCapacity.to_string())
                            .default(default.dedup_window_capacity)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

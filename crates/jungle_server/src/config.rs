//! Service configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use jungle_game::{Difficulty, GameMode, RiverCapture, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the HTTP game service.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Seat assignment for sessions started without an explicit mode.
    #[serde(default)]
    default_mode: GameMode,

    /// AI strength for sessions started without an explicit difficulty.
    #[serde(default)]
    default_difficulty: Difficulty,

    /// Shoreline capture policy for new sessions.
    #[serde(default)]
    river_capture: RiverCapture,

    /// Replaces the Master tier's search budget, in milliseconds.
    #[serde(default)]
    ai_time_budget_ms: Option<u64>,

    /// Let the AI answer automatically: after a human move in pve, and for
    /// the second side of an aivai turn.
    #[serde(default = "default_auto_reply")]
    auto_reply: bool,

    /// Named sessions kept open besides the default one; opening another
    /// closes the least recently used.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_auto_reply() -> bool {
    true
}

fn default_max_sessions() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_mode: GameMode::default(),
            default_difficulty: Difficulty::default(),
            river_capture: RiverCapture::default(),
            ai_time_budget_ms: None,
            auto_reply: default_auto_reply(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides automatic AI replies.
    pub fn with_auto_reply(mut self, auto_reply: bool) -> Self {
        self.auto_reply = auto_reply;
        self
    }

    /// Overrides the named-session cap.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Overrides the Master search budget.
    pub fn with_ai_time_budget_ms(mut self, budget_ms: u64) -> Self {
        self.ai_time_budget_ms = Some(budget_ms);
        self
    }

    /// Rule variant applied to new sessions.
    pub fn rules(&self) -> RuleSet {
        RuleSet::new(self.river_capture)
    }

    /// Master search budget override, if configured.
    pub fn ai_time_budget(&self) -> Option<Duration> {
        self.ai_time_budget_ms.map(Duration::from_millis)
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

//! Daemon configuration with TOML file support.

use camara_chamber::ChamberParams;
use camara_roster::{Roster, Voter};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a chamber daemon.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`]; every
/// field has a default so an empty file is valid (with an empty roster).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address the HTTP API binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    /// HTTP API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Window length for proposals submitted without one, in seconds.
    #[serde(default = "default_window_secs")]
    pub default_window_secs: u64,

    /// How many closed proposals the dashboards list.
    #[serde(default = "default_recently_closed_limit")]
    pub recently_closed_limit: usize,

    /// The council roster.
    #[serde(default)]
    pub voters: Vec<Voter>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_window_secs() -> u64 {
    60
}

fn default_recently_closed_limit() -> usize {
    5
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["human", "json"];

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_window_secs == 0 {
            return Err(ConfigError::Invalid(
                "default_window_secs must be positive".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level {:?}, expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.log_format.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log_format {:?}, expected \"human\" or \"json\"",
                self.log_format
            )));
        }
        for voter in &self.voters {
            if let Some(seat) = &voter.seat {
                if seat.weight > 1 {
                    return Err(ConfigError::Invalid(format!(
                        "voter {}: seat weight must be 0 or 1",
                        voter.id
                    )));
                }
            }
        }
        let casting = self
            .voters
            .iter()
            .filter(|v| v.active && v.holds_casting_vote())
            .count();
        if casting > 1 {
            return Err(ConfigError::Invalid(
                "more than one active member holds the casting vote".into(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }

    pub fn chamber_params(&self) -> ChamberParams {
        ChamberParams {
            default_window_secs: self.default_window_secs,
            recently_closed_limit: self.recently_closed_limit,
        }
    }

    pub fn roster(&self) -> Roster {
        Roster::from_voters(self.voters.iter().cloned())
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            default_window_secs: default_window_secs(),
            recently_closed_limit: default_recently_closed_limit(),
            voters: Vec::new(),
        }
    }
}

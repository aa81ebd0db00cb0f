use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use crate::models::game::RosterPolicy;

const DEFAULT_KEEPER_BASE_URL: &str = "http://keeper.battlelog.com";
const DEFAULT_SERVER_NAME: &str = "Global-Conflict-org-EU-Server";
const DEFAULT_SERVER_UUID: &str = "3ac44c83-df31-4bc4-bccb-fea4902a0304";

#[derive(Clone)]
pub struct Config {
    pub keeper_base_url: String,
    pub server_name: String,
    pub server_uuid: Uuid,

    // Poll cadence
    pub poll_interval_secs: u64,
    pub retry_interval_secs: u64,
    pub http_timeout_secs: u64,

    // Report output
    pub report_root: PathBuf,
    pub include_commander_in_roster: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidServerUuid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidServerUuid(value) => {
                write!(f, "SERVER_UUID is not a valid UUID: {}", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            keeper_base_url: DEFAULT_KEEPER_BASE_URL.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_uuid: Uuid::parse_str(DEFAULT_SERVER_UUID).unwrap_or_else(|_| Uuid::nil()),
            poll_interval_secs: 60,
            retry_interval_secs: 5,
            http_timeout_secs: 10,
            report_root: PathBuf::from("./battle_reports"),
            include_commander_in_roster: true,
        }
    }
}

impl Config {
    /// Build the configuration from the environment. A bad value for
    /// any knob falls back to its default; the only fatal case is a
    /// SERVER_UUID that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_uuid =
            env::var("SERVER_UUID").unwrap_or_else(|_| DEFAULT_SERVER_UUID.to_string());
        let server_uuid =
            Uuid::parse_str(&raw_uuid).map_err(|_| ConfigError::InvalidServerUuid(raw_uuid))?;

        Ok(Self {
            keeper_base_url: env::var("KEEPER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_KEEPER_BASE_URL.to_string()),

            server_name: env::var("SERVER_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVER_NAME.to_string()),

            server_uuid,

            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),

            retry_interval_secs: env::var("RETRY_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            report_root: env::var("REPORT_ROOT")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./battle_reports")),

            include_commander_in_roster: env::var("INCLUDE_COMMANDER_IN_ROSTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn roster_policy(&self) -> RosterPolicy {
        if self.include_commander_in_roster {
            RosterPolicy::IncludeCommander
        } else {
            RosterPolicy::ExcludeCommander
        }
    }
}

// src/utils.rs
use reqwest::StatusCode;
use std::fmt;

use crate::models::snapshot::SnapshotError;

/// Everything that can end a poll cycle early. None of these are
/// fatal: the poller logs the failure and retries on the short
/// interval.
#[derive(Debug)]
pub enum CycleError {
    Transport(reqwest::Error),
    BadStatus(StatusCode),
    Decode(serde_json::Error),
    Snapshot(SnapshotError),
    Report(std::io::Error),
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "snapshot request failed: {}", e),
            Self::BadStatus(status) => write!(f, "keeper answered {}", status),
            Self::Decode(e) => write!(f, "malformed snapshot body: {}", e),
            Self::Snapshot(e) => write!(f, "{}", e),
            Self::Report(e) => write!(f, "failed to write battle report: {}", e),
        }
    }
}

impl std::error::Error for CycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::BadStatus(_) => None,
            Self::Decode(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for CycleError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<serde_json::Error> for CycleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<SnapshotError> for CycleError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

impl From<std::io::Error> for CycleError {
    fn from(e: std::io::Error) -> Self {
        Self::Report(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_errors_convert_for_question_mark() {
        let err: CycleError = SnapshotError::MissingTeam("1").into();
        assert!(matches!(err, CycleError::Snapshot(_)));
        assert_eq!(err.to_string(), "snapshot has no team info for index 1");
    }

    #[test]
    fn bad_status_displays_the_code() {
        let err = CycleError::BadStatus(StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("502"));
    }
}

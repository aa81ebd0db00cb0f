// src/models/snapshot.rs
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Wire document returned by `GET /snapshot/{uuid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotEnvelope {
    pub snapshot: Snapshot,
}

/// One polled view of live match state. Missing required fields fail
/// at decode time with the serde error naming the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_map: String,
    pub game_mode: String,
    /// Seconds since the current round began.
    pub round_time: u64,
    pub game_id: GameId,
    pub waiting_players: u64,
    /// Rosters keyed by team index: "0" is the joining pool, "1" and
    /// "2" are the playable factions.
    pub team_info: BTreeMap<String, TeamInfo>,
    /// Remaining tickets keyed by team index "1"/"2".
    pub conquest: BTreeMap<String, ConquestScore>,
}

/// Keeper reports the game id as a number; older payloads used a
/// string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GameId {
    Number(i64),
    Text(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamInfo {
    /// Absent for the joining pool (team "0").
    pub faction: Option<i64>,
    pub players: BTreeMap<String, PlayerAttrs>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConquestScore {
    pub tickets: i64,
}

/// Per-player attributes as sent by Keeper. Players still loading in
/// arrive with fields missing, so every attribute is optional and
/// absence is only reported when the field is actually read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerAttrs {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub rank: Option<i64>,
    pub score: Option<i64>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub squad: Option<i64>,
    pub role: Option<i64>,
}

/// Semantic problems with an otherwise well-formed snapshot. All of
/// these end the current poll cycle; none are fatal to the process.
#[derive(Debug)]
pub enum SnapshotError {
    MissingTeam(&'static str),
    MissingTickets(&'static str),
    MissingFaction,
    UnknownFaction(i64),
    MissingField { player: String, field: &'static str },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTeam(index) => {
                write!(f, "snapshot has no team info for index {}", index)
            }
            Self::MissingTickets(index) => {
                write!(f, "snapshot has no conquest tickets for team {}", index)
            }
            Self::MissingFaction => write!(f, "team reported no faction code"),
            Self::UnknownFaction(code) => write!(f, "unknown faction code {}", code),
            Self::MissingField { player, field } => {
                write!(f, "player {} is missing field '{}'", player, field)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "snapshot": {
                "currentMap": "XP4/Levels/XP4_SubBase/XP4_SubBase",
                "gameMode": "ConquestLarge0",
                "roundTime": 125,
                "gameId": 403004,
                "waitingPlayers": 3,
                "teamInfo": {
                    "0": { "players": {} },
                    "1": {
                        "faction": 0,
                        "players": {
                            "100": {
                                "name": "alpha", "tag": "OAK", "rank": 45,
                                "score": 1200, "kills": 7, "deaths": 2,
                                "squad": 1, "role": 1
                            }
                        }
                    },
                    "2": { "faction": 1, "players": {} }
                },
                "conquest": {
                    "1": { "tickets": 760 },
                    "2": { "tickets": 800 }
                }
            }
        })
    }

    #[test]
    fn decodes_a_full_envelope() {
        let envelope: SnapshotEnvelope = serde_json::from_value(sample()).unwrap();
        let snapshot = envelope.snapshot;

        assert_eq!(snapshot.current_map, "XP4/Levels/XP4_SubBase/XP4_SubBase");
        assert_eq!(snapshot.game_mode, "ConquestLarge0");
        assert_eq!(snapshot.round_time, 125);
        assert_eq!(snapshot.game_id, GameId::Number(403004));
        assert_eq!(snapshot.waiting_players, 3);
        assert_eq!(snapshot.team_info.len(), 3);
        assert_eq!(snapshot.conquest["1"].tickets, 760);

        let attrs = &snapshot.team_info["1"].players["100"];
        assert_eq!(attrs.name.as_deref(), Some("alpha"));
        assert_eq!(attrs.role, Some(1));
    }

    #[test]
    fn game_id_accepts_strings_and_numbers() {
        let number: GameId = serde_json::from_value(json!(42)).unwrap();
        let text: GameId = serde_json::from_value(json!("42-abc")).unwrap();
        assert_eq!(number.to_string(), "42");
        assert_eq!(text.to_string(), "42-abc");
    }

    #[test]
    fn missing_required_fields_name_the_field() {
        let mut doc = sample();
        doc["snapshot"]
            .as_object_mut()
            .unwrap()
            .remove("roundTime");

        let err = serde_json::from_value::<SnapshotEnvelope>(doc).unwrap_err();
        assert!(err.to_string().contains("roundTime"), "got: {}", err);
    }

    #[test]
    fn player_attrs_tolerate_absent_fields() {
        let attrs: PlayerAttrs = serde_json::from_value(json!({ "name": "beta" })).unwrap();
        assert_eq!(attrs.name.as_deref(), Some("beta"));
        assert_eq!(attrs.tag, None);
        assert_eq!(attrs.role, None);
    }
}

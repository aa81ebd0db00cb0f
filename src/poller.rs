// src/poller.rs
use log::{error, info};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::keeper::KeeperClient;
use crate::models::game::Game;
use crate::models::snapshot::SnapshotEnvelope;
use crate::report;
use crate::storage::reports::ReportStore;
use crate::utils::CycleError;

/// How one poll cycle ended. The outcome is the whole state machine:
/// it picks the delay before the next fetch.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Match in progress, header printed, report file written.
    Reported,
    /// Round clock still at zero.
    NotStarted,
    Failed(CycleError),
}

pub struct Poller {
    config: Config,
    client: KeeperClient,
    store: ReportStore,
}

impl Poller {
    pub fn new(config: Config, client: KeeperClient, store: ReportStore) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    /// Fetch, report, sleep, repeat. Only Ctrl-C ends the loop; every
    /// failure is logged and retried.
    pub async fn run(self) {
        loop {
            let outcome = self.cycle().await;
            let delay = self.next_delay(&outcome);

            tokio::select! {
                _ = sleep(delay) => {}
                _ = tokio::signal::ctrl_c() => {
                    println!("Shutting down.");
                    return;
                }
            }
        }
    }

    async fn cycle(&self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(e) => {
                match &e {
                    CycleError::Transport(_) | CycleError::BadStatus(_) => {
                        error!("snapshot fetch failed: {}", e);
                    }
                    _ => {
                        println!("Server Data unavailable...");
                        error!("snapshot rejected: {}", e);
                    }
                }
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn poll_once(&self) -> Result<CycleOutcome, CycleError> {
        let (status, body) = self.client.fetch_snapshot().await?;
        println!("{}", status.as_u16());

        if !status.is_success() {
            return Err(CycleError::BadStatus(status));
        }
        self.handle_body(&body)
    }

    /// Decode the snapshot and either report or keep waiting. Split
    /// from the fetch so the whole classification path runs without a
    /// network.
    fn handle_body(&self, body: &str) -> Result<CycleOutcome, CycleError> {
        let envelope: SnapshotEnvelope = serde_json::from_str(body)?;
        let game = Game::new(envelope.snapshot, self.config.roster_policy());

        if !game.started() {
            println!("Game has not started...");
            return Ok(CycleOutcome::NotStarted);
        }

        let rendered = report::render(&game)?;
        for line in &rendered.header {
            println!("{}", line);
        }
        println!("{}", "=".repeat(report::LINE_WIDTH));

        let path = self.store.write(game.map(), &rendered)?;
        info!("game {} on {}: report written to {}", game.id(), game.map(), path.display());

        Ok(CycleOutcome::Reported)
    }

    /// Backoff policy: the normal interval only after a written
    /// report; the short retry interval while the match has not
    /// started and after any failure. Fixed delays, no doubling.
    fn next_delay(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::Reported => self.config.poll_interval(),
            CycleOutcome::NotStarted | CycleOutcome::Failed(_) => self.config.retry_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_root(label: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "battle_keeper_poller_{}_{}",
            label,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        root
    }

    fn poller(root: &PathBuf) -> Poller {
        let config = Config::default();
        let client = KeeperClient::new(&config).unwrap();
        let store = ReportStore::new(root.clone(), "Test-Server");
        Poller::new(config, client, store)
    }

    fn snapshot_body(round_time: u64) -> String {
        json!({
            "snapshot": {
                "currentMap": "XP4/Levels/XP4_SubBase/XP4_SubBase",
                "gameMode": "ConquestLarge0",
                "roundTime": round_time,
                "gameId": 403004,
                "waitingPlayers": 0,
                "teamInfo": {
                    "0": { "players": {} },
                    "1": {
                        "faction": 0,
                        "players": {
                            "100": {
                                "name": "alpha", "tag": "OAK", "rank": 45,
                                "score": 1200, "kills": 7, "deaths": 2,
                                "squad": 1, "role": 1
                            },
                            "101": {
                                "name": "bravo", "tag": "", "rank": 12,
                                "score": 300, "kills": 1, "deaths": 4,
                                "squad": 2, "role": 2
                            }
                        }
                    },
                    "2": {
                        "faction": 1,
                        "players": {
                            "200": {
                                "name": "carol", "tag": "GC", "rank": 30,
                                "score": 450, "kills": 3, "deaths": 3,
                                "squad": 1, "role": 1
                            },
                            "201": {
                                "name": "dimitri", "tag": "GC", "rank": 50,
                                "score": 900, "kills": 9, "deaths": 1,
                                "squad": 1, "role": 2
                            }
                        }
                    }
                },
                "conquest": {
                    "1": { "tickets": 760 },
                    "2": { "tickets": 800 }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn unstarted_games_write_no_report() {
        let root = scratch_root("unstarted");
        let poller = poller(&root);

        let outcome = poller.handle_body(&snapshot_body(0)).unwrap();
        assert!(matches!(outcome, CycleOutcome::NotStarted));
        assert!(!root.exists(), "no report tree should exist");
    }

    #[test]
    fn started_games_write_the_full_report() {
        let root = scratch_root("started");
        let poller = poller(&root);

        let outcome = poller.handle_body(&snapshot_body(125)).unwrap();
        assert!(matches!(outcome, CycleOutcome::Reported));

        let map_dir = poller.store.day_root().join("Hammerhead");
        let mut entries = fs::read_dir(&map_dir).unwrap();
        let path = entries.next().unwrap().unwrap().path();
        let written = fs::read_to_string(path).unwrap();

        assert!(written.contains("Hammerhead"));
        assert!(written.contains("00:02:05"));
        assert_eq!(written.matches("Army 1 Commander:").count(), 1);
        assert_eq!(written.matches("Army 2 Commander:").count(), 1);
        assert!(written.contains(" Army 1 Commander: bravo"));
        assert!(written.contains(" Army 2 Commander: [GC] dimitri"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        let root = scratch_root("malformed");
        let poller = poller(&root);

        let err = poller.handle_body("{ not json").unwrap_err();
        assert!(matches!(err, CycleError::Decode(_)));
    }

    #[test]
    fn missing_tickets_fail_the_cycle_without_a_report() {
        let root = scratch_root("tickets");
        let poller = poller(&root);

        let mut doc: serde_json::Value = serde_json::from_str(&snapshot_body(125)).unwrap();
        doc["snapshot"]["conquest"]
            .as_object_mut()
            .unwrap()
            .remove("2");

        let err = poller.handle_body(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CycleError::Snapshot(_)));
        assert!(!root.exists());
    }

    #[test]
    fn delays_follow_the_backoff_table() {
        let root = scratch_root("delays");
        let poller = poller(&root);

        assert_eq!(
            poller.next_delay(&CycleOutcome::Reported),
            Duration::from_secs(60)
        );
        assert_eq!(
            poller.next_delay(&CycleOutcome::NotStarted),
            Duration::from_secs(5)
        );
        assert_eq!(
            poller.next_delay(&CycleOutcome::Failed(CycleError::BadStatus(
                reqwest::StatusCode::BAD_GATEWAY
            ))),
            Duration::from_secs(5)
        );
    }
}

// src/models/game.rs
use std::collections::BTreeMap;
use std::fmt;

use crate::maps;
use crate::models::snapshot::{GameId, PlayerAttrs, Snapshot, SnapshotError, TeamInfo};

/// Role code Keeper assigns to the commander slot. External contract.
const COMMANDER_ROLE: i64 = 2;

const LOBBY_TEAM: &str = "0";
const TEAM_ONE: &str = "1";
const TEAM_TWO: &str = "2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Us,
    Ru,
    Cn,
}

impl Faction {
    fn from_code(code: i64) -> Result<Self, SnapshotError> {
        match code {
            0 => Ok(Self::Us),
            1 => Ok(Self::Ru),
            2 => Ok(Self::Cn),
            other => Err(SnapshotError::UnknownFaction(other)),
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Us => "US",
            Self::Ru => "RU",
            Self::Cn => "CN",
        };
        write!(f, "{}", name)
    }
}

/// Whether commander-flagged entries stay in `Army::soldiers`. Keeper
/// reports the commander inside the roster; reports that list the
/// commander separately want it filtered back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterPolicy {
    IncludeCommander,
    ExcludeCommander,
}

/// One player, frozen at the instant of the snapshot.
#[derive(Debug, Clone)]
pub struct Soldier {
    id: String,
    attrs: PlayerAttrs,
}

impl Soldier {
    pub fn new(id: impl Into<String>, attrs: PlayerAttrs) -> Self {
        Self {
            id: id.into(),
            attrs,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Result<&str, SnapshotError> {
        self.attrs.name.as_deref().ok_or_else(|| self.missing("name"))
    }

    pub fn tag(&self) -> Result<&str, SnapshotError> {
        self.attrs.tag.as_deref().ok_or_else(|| self.missing("tag"))
    }

    pub fn rank(&self) -> Result<i64, SnapshotError> {
        self.attrs.rank.ok_or_else(|| self.missing("rank"))
    }

    pub fn score(&self) -> Result<i64, SnapshotError> {
        self.attrs.score.ok_or_else(|| self.missing("score"))
    }

    pub fn kills(&self) -> Result<i64, SnapshotError> {
        self.attrs.kills.ok_or_else(|| self.missing("kills"))
    }

    pub fn deaths(&self) -> Result<i64, SnapshotError> {
        self.attrs.deaths.ok_or_else(|| self.missing("deaths"))
    }

    pub fn squad(&self) -> Result<i64, SnapshotError> {
        self.attrs.squad.ok_or_else(|| self.missing("squad"))
    }

    pub fn role(&self) -> Option<i64> {
        self.attrs.role
    }

    /// An absent role is simply not a commander, never an error.
    pub fn is_commander(&self) -> bool {
        self.attrs.role == Some(COMMANDER_ROLE)
    }

    /// "[tag] name", or the bare name for players without a tag.
    pub fn display_name(&self) -> Result<String, SnapshotError> {
        let name = self.name()?;
        let tag = self.tag()?;
        if tag.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("[{}] {}", tag, name))
        }
    }

    fn missing(&self, field: &'static str) -> SnapshotError {
        SnapshotError::MissingField {
            player: self.id.clone(),
            field,
        }
    }
}

/// One playable team: the roster for a team index plus the ticket
/// count the snapshot reports in its separate conquest block.
#[derive(Debug, Clone)]
pub struct Army {
    team: TeamInfo,
    tickets: i64,
    policy: RosterPolicy,
}

impl Army {
    pub fn new(team: TeamInfo, tickets: i64, policy: RosterPolicy) -> Self {
        Self {
            team,
            tickets,
            policy,
        }
    }

    pub fn tickets(&self) -> i64 {
        self.tickets
    }

    pub fn faction(&self) -> Result<Faction, SnapshotError> {
        let code = self.team.faction.ok_or(SnapshotError::MissingFaction)?;
        Faction::from_code(code)
    }

    /// The roster in snapshot order, commander entries filtered out
    /// under `ExcludeCommander`.
    pub fn soldiers(&self) -> Vec<Soldier> {
        let roster = self.roster();
        match self.policy {
            RosterPolicy::IncludeCommander => roster,
            RosterPolicy::ExcludeCommander => {
                roster.into_iter().filter(|s| !s.is_commander()).collect()
            }
        }
    }

    /// Soldiers grouped by raw squad id. The id is not validated
    /// against any squad enum.
    pub fn squads(&self) -> Result<BTreeMap<i64, Vec<Soldier>>, SnapshotError> {
        let mut squads: BTreeMap<i64, Vec<Soldier>> = BTreeMap::new();
        for soldier in self.soldiers() {
            squads.entry(soldier.squad()?).or_default().push(soldier);
        }
        Ok(squads)
    }

    /// Exact sum of roster scores; a missing score is an error, not a
    /// silent zero.
    pub fn score(&self) -> Result<i64, SnapshotError> {
        let mut total = 0;
        for soldier in self.soldiers() {
            total += soldier.score()?;
        }
        Ok(total)
    }

    /// Display name of the first commander-flagged entry in the full
    /// roster, regardless of roster policy. "Unassigned" if the slot
    /// is empty.
    pub fn commander(&self) -> Result<String, SnapshotError> {
        match self.roster().into_iter().find(|s| s.is_commander()) {
            Some(commander) => commander.display_name(),
            None => Ok(String::from("Unassigned")),
        }
    }

    fn roster(&self) -> Vec<Soldier> {
        self.team
            .players
            .iter()
            .map(|(id, attrs)| Soldier::new(id.clone(), attrs.clone()))
            .collect()
    }
}

/// Domain view over one decoded snapshot. Armies are rebuilt on each
/// access; nothing here outlives the poll cycle.
#[derive(Debug, Clone)]
pub struct Game {
    snapshot: Snapshot,
    policy: RosterPolicy,
}

impl Game {
    pub fn new(snapshot: Snapshot, policy: RosterPolicy) -> Self {
        Self { snapshot, policy }
    }

    pub fn map(&self) -> &'static str {
        maps::resolve(&self.snapshot.current_map)
    }

    pub fn mode(&self) -> &str {
        &self.snapshot.game_mode
    }

    /// Round time rendered as HH:MM:SS. Treated as a duration on a
    /// 24h clock; rounds longer than a day wrap.
    pub fn elapsed_time(&self) -> String {
        let secs = self.snapshot.round_time % 86_400;
        format!("{:02}:{:02}:{:02}", secs / 3_600, secs % 3_600 / 60, secs % 60)
    }

    pub fn started(&self) -> bool {
        self.snapshot.round_time > 0
    }

    pub fn id(&self) -> &GameId {
        &self.snapshot.game_id
    }

    pub fn waiting_count(&self) -> u64 {
        self.snapshot.waiting_players
    }

    /// Players connected to the server but not yet on a faction.
    pub fn lobby(&self) -> Result<Vec<Soldier>, SnapshotError> {
        let team = self.team(LOBBY_TEAM)?;
        Ok(team
            .players
            .iter()
            .map(|(id, attrs)| Soldier::new(id.clone(), attrs.clone()))
            .collect())
    }

    pub fn army_1(&self) -> Result<Army, SnapshotError> {
        self.army(TEAM_ONE)
    }

    pub fn army_2(&self) -> Result<Army, SnapshotError> {
        self.army(TEAM_TWO)
    }

    fn army(&self, index: &'static str) -> Result<Army, SnapshotError> {
        let team = self.team(index)?;
        let tickets = self
            .snapshot
            .conquest
            .get(index)
            .ok_or(SnapshotError::MissingTickets(index))?
            .tickets;
        Ok(Army::new(team.clone(), tickets, self.policy))
    }

    fn team(&self, index: &'static str) -> Result<&TeamInfo, SnapshotError> {
        self.snapshot
            .team_info
            .get(index)
            .ok_or(SnapshotError::MissingTeam(index))
    }
}

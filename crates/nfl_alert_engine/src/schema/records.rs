use serde::{Deserialize, Serialize};
use std::fmt;

/// ESPN game id, e.g. `401547353`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
	pub fn new(id: impl Into<String>) -> Self {
		GameId(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for GameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One free-text play description and where it sits in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
	/// Position of the play in feed order across all drives.
	pub sequence: usize,
	pub description: String,
}

impl PlayRecord {
	pub fn new(sequence: usize, description: impl Into<String>) -> Self {
		PlayRecord {
			sequence,
			description: description.into(),
		}
	}
}

/// One scoring summary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRecord {
	/// `TD`, `FG`, `SF`, ...
	pub type_code: String,
	pub description: String,
	pub period: u8,
	pub clock: String,
	/// Only consulted for defensive scores.
	pub team_id: Option<String>,
}

impl ScoringRecord {
	pub const TOUCHDOWN: &'static str = "TD";

	pub fn is_touchdown(&self) -> bool {
		self.type_code == Self::TOUCHDOWN
	}
}

/// A team taking part in the game, as listed in the feed's game strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
	pub id: String,
	/// `Indianapolis Colts`; defenses are rostered under this name.
	pub display_name: String,
	pub abbreviation: String,
}

/// Everything the engine reads for one game in one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
	pub plays: Vec<PlayRecord>,
	pub scoring: Vec<ScoringRecord>,
	pub teams: Vec<TeamRef>,
}

impl GameSnapshot {
	pub fn team_name(&self, team_id: &str) -> Option<&str> {
		self.teams.iter().find(|team| team.id == team_id).map(|team| team.display_name.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.plays.is_empty() && self.scoring.is_empty()
	}
}

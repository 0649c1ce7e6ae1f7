use crate::parsers::names;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A rostered participant playing in a given game.
///
/// Defenses are rostered under their team display name (`Indianapolis Colts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
	pub season: i32,
	pub owner_id: i64,
	pub owner_name: Option<String>,
	pub phone_number: Option<String>,
	pub player_name: String,
	pub team_abbreviation: String,
	pub opponent_abbreviation: String,
	pub game_date: NaiveDateTime,
}

impl RosterEntry {
	/// `J.Jefferson` for `Justin Jefferson`, the form used in play descriptions.
	pub fn abbreviated_name(&self) -> Option<String> {
		names::abbreviate(&self.player_name)
	}

	pub fn is_named(&self, name: &str) -> bool {
		self.player_name.eq_ignore_ascii_case(name.trim())
	}
}


#[cfg(test)]
mod tests {
	use super::fixtures::entry;

	#[test]
	fn test_abbreviated_name() {
		assert_eq!(entry("Justin Jefferson", "MIN", "NYG").abbreviated_name().as_deref(), Some("J.Jefferson"));
		assert_eq!(entry("James Conner", "ARI", "BUF").abbreviated_name().as_deref(), Some("J.Conner"));
	}

	#[test]
	fn test_defense_matches_team_name_case_insensitively() {
		let defense = entry("Indianapolis Colts", "IND", "HOU");
		assert!(defense.is_named("indianapolis colts"));
		assert!(!defense.is_named("Houston Texans"));
	}
}

use crate::error::AppError;
use chrono::NaiveDateTime;
use nfl_alert_engine::{GameId, RosterEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One row of the weekly roster export: a participant on an owner's team,
/// with the game they play in this week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterRow {
	pub season: i32,
	pub owner_id: i64,
	pub owner_name: Option<String>,
	pub phone_number: Option<String>,
	pub player_name: String,
	pub team_abbreviation: String,
	pub opponent_abbreviation: String,
	pub game_ended: bool,
	pub game_date: String,
	pub espn_game_id: String,
}

/// A game that has kicked off and not ended, with everyone rostered in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveGame {
	pub game_id: GameId,
	pub roster: Vec<RosterEntry>,
}

impl RosterRow {
	fn kickoff(&self) -> Result<NaiveDateTime, AppError> {
		crate::config::parse_now(&self.game_date).map_err(|e| AppError::invalid_roster_row_error(&self.player_name, e))
	}

	fn into_entry(self, game_date: NaiveDateTime) -> RosterEntry {
		RosterEntry {
			season: self.season,
			owner_id: self.owner_id,
			owner_name: self.owner_name.filter(|name| !name.is_empty()),
			phone_number: self.phone_number.filter(|phone| !phone.is_empty()),
			player_name: self.player_name,
			team_abbreviation: self.team_abbreviation,
			opponent_abbreviation: self.opponent_abbreviation,
			game_date,
		}
	}
}

pub fn read_roster(path: &Path) -> Result<Vec<RosterRow>, AppError> {
	let mut reader = csv::Reader::from_path(path)?;
	let rows = reader.deserialize().collect::<Result<Vec<RosterRow>, csv::Error>>()?;

	debug!(path = %path.display(), rows = rows.len(), "Read roster");
	Ok(rows)
}

/// Groups rows by game, keeping games that are under way at `now`.
///
/// Games come back in ascending game id order, each roster in file order.
pub fn live_games(rows: Vec<RosterRow>, now: NaiveDateTime) -> Result<Vec<LiveGame>, AppError> {
	let mut games: BTreeMap<GameId, Vec<RosterEntry>> = BTreeMap::new();

	for row in rows {
		let kickoff = row.kickoff()?;
		if row.game_ended || kickoff > now {
			continue;
		}

		let game_id = GameId::new(row.espn_game_id.trim());
		if game_id.as_str().is_empty() {
			return Err(AppError::invalid_roster_row_error(&row.player_name, "missing espn_game_id"));
		}

		games.entry(game_id).or_default().push(row.into_entry(kickoff));
	}

	Ok(games.into_iter().map(|(game_id, roster)| LiveGame { game_id, roster }).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const ROSTER: &str = "\
season,owner_id,owner_name,phone_number,player_name,team_abbreviation,opponent_abbreviation,game_ended,game_date,espn_game_id
2024,1,Sam,5550100,Kyren Williams,LAR,DET,false,2024-09-08 20:20:00,401671789
2024,2,,,Jahmyr Gibbs,DET,LAR,false,2024-09-08 20:20:00,401671789
2024,1,Sam,5550100,Josh Allen,BUF,ARI,false,2024-09-08 13:00:00,401671716
2024,2,,,Arizona Cardinals,ARI,BUF,true,2024-09-08 13:00:00,401671716
2024,3,Alex,,Justin Jefferson,MIN,NYG,false,2024-09-08T13:00:00,401671628
";

	fn rows() -> Vec<RosterRow> {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(ROSTER.as_bytes()).unwrap();
		read_roster(file.path()).unwrap()
	}

	fn at(timestamp: &str) -> NaiveDateTime {
		crate::config::parse_now(timestamp).unwrap()
	}

	#[test]
	fn test_read_roster() {
		let rows = rows();

		assert_eq!(rows.len(), 5);
		assert_eq!(rows[0].owner_name.as_deref(), Some("Sam"));
		assert_eq!(rows[1].owner_name, None);
		assert!(rows[3].game_ended);
	}

	#[test]
	fn test_live_games_are_ordered_and_filtered() {
		let games = live_games(rows(), at("2024-09-08 14:30:00")).unwrap();
		let ids: Vec<&str> = games.iter().map(|game| game.game_id.as_str()).collect();

		assert_eq!(ids, vec!["401671628", "401671716"]);
		assert_eq!(games[1].roster.len(), 1);
		assert_eq!(games[1].roster[0].player_name, "Josh Allen");
		assert_eq!(games[0].roster[0].owner_name.as_deref(), Some("Alex"));
		assert_eq!(games[0].roster[0].phone_number, None);
	}

	#[test]
	fn test_nothing_is_live_before_kickoff() {
		assert!(live_games(rows(), at("2024-09-08 12:59:59")).unwrap().is_empty());
	}

	#[test]
	fn test_bad_game_date_is_rejected() {
		let mut rows = rows();
		rows[0].game_date = "Sunday night".to_string();

		let error = live_games(rows, at("2024-09-09 00:00:00")).unwrap_err();
		assert!(matches!(error, AppError::InvalidRosterRow { player, .. } if player == "Kyren Williams"));
	}
}

//! Locates the play-by-play payload ESPN embeds in a game page.
//!
//! The page carries its state as `window['__espnfitt__']={...};` inside a
//! `<script>` element. Only three sections of `page.content.gamepackage` are
//! read: the drives (`allPlys`), the scoring summary (`scrSumm`) and the game
//! strip's teams (`gmStrp.tms`).

use crate::error::AppError;
use nfl_alert_engine::{GameId, GameSnapshot, PlayRecord, ScoringRecord, TeamRef};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

const PAYLOAD_MARKER: &str = "window['__espnfitt__']";

#[derive(Debug, Deserialize)]
struct Fitt {
	page: FittPage,
}

#[derive(Debug, Deserialize)]
struct FittPage {
	content: FittContent,
}

#[derive(Debug, Deserialize)]
struct FittContent {
	gamepackage: GamePackage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GamePackage {
	#[serde(default, deserialize_with = "lenient_list")]
	all_plys: Vec<Drive>,
	#[serde(default, deserialize_with = "lenient_list")]
	scr_summ: Vec<ScoringGroup>,
	#[serde(default)]
	gm_strp: Option<GameStrip>,
}

#[derive(Debug, Deserialize)]
struct Drive {
	#[serde(default, deserialize_with = "lenient_list")]
	items: Vec<DriveItem>,
}

#[derive(Debug, Deserialize)]
struct DriveItem {
	#[serde(default, deserialize_with = "lenient_list")]
	plays: Vec<FeedPlay>,
}

#[derive(Debug, Deserialize)]
struct FeedPlay {
	#[serde(default, deserialize_with = "lenient_text")]
	description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoringGroup {
	#[serde(default, deserialize_with = "lenient_list")]
	items: Vec<FeedScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedScore {
	#[serde(default, deserialize_with = "lenient_text")]
	type_abbreviation: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	play_text: Option<String>,
	#[serde(default, deserialize_with = "lenient_period")]
	period_num: u8,
	#[serde(default, deserialize_with = "lenient_text")]
	clock: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GameStrip {
	#[serde(default, deserialize_with = "lenient_list")]
	tms: Vec<FeedTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedTeam {
	#[serde(default, deserialize_with = "lenient_text")]
	id: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	display_name: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	abbrev: Option<String>,
}

/// A list whose malformed entries are dropped one by one; `null` reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

	Ok(values
		.into_iter()
		.filter_map(|value| match serde_json::from_value(value) {
			Ok(item) => Some(item),
			Err(e) => {
				warn!(error = %e, "Skipping malformed feed entry");
				None
			}
		})
		.collect())
}

/// The feed sends ids and clocks as strings or numbers, and sometimes `null`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	})
}

/// Unreadable periods become 0, which the engine rejects per record.
fn lenient_period<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
	let period = match Value::deserialize(deserializer)? {
		Value::Number(number) => number.as_u64().and_then(|period| u8::try_from(period).ok()),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	};
	Ok(period.unwrap_or(0))
}

impl From<GamePackage> for GameSnapshot {
	fn from(package: GamePackage) -> Self {
		let plays = package
			.all_plys
			.into_iter()
			.flat_map(|drive| drive.items)
			.flat_map(|item| item.plays)
			.filter_map(|play| play.description)
			.enumerate()
			.map(|(sequence, description)| PlayRecord::new(sequence, description))
			.collect();

		let scoring = package
			.scr_summ
			.into_iter()
			.flat_map(|group| group.items)
			.map(|score| ScoringRecord {
				type_code: score.type_abbreviation.unwrap_or_default(),
				description: score.play_text.unwrap_or_default(),
				period: score.period_num,
				clock: score.clock.unwrap_or_default(),
				team_id: score.team_id,
			})
			.collect();

		let teams = package
			.gm_strp
			.map(|strip| strip.tms)
			.unwrap_or_default()
			.into_iter()
			.filter_map(|team| {
				Some(TeamRef {
					id: team.id?,
					display_name: team.display_name.unwrap_or_default(),
					abbreviation: team.abbrev.unwrap_or_default(),
				})
			})
			.collect();

		GameSnapshot { plays, scoring, teams }
	}
}

/// The JSON text assigned to the payload marker, if any script carries it.
pub fn extract_payload(html: &str) -> Result<Option<String>, AppError> {
	let document = Html::parse_document(html);
	let script_selector = Selector::parse("script").map_err(|_| AppError::HtmlParseError)?;

	let payload = document.select(&script_selector).find_map(|script| {
		let text = script.text().collect::<String>();
		let after_marker = &text[text.find(PAYLOAD_MARKER)? + PAYLOAD_MARKER.len()..];
		let (_, assigned) = after_marker.split_once('=')?;
		Some(assigned.trim().trim_end_matches(';').trim_end().to_string())
	});

	Ok(payload)
}

/// Parses a saved page into the snapshot the engine classifies.
///
/// A page without the marker is a failure for this poll; sections missing
/// from the payload read as empty.
pub fn parse_page(html: &str, page: &str) -> Result<GameSnapshot, AppError> {
	let payload = extract_payload(html)?.ok_or_else(|| AppError::missing_payload_error(page))?;
	let fitt: Fitt = serde_json::from_str(&payload)?;
	let snapshot = GameSnapshot::from(fitt.page.content.gamepackage);

	debug!(page, plays = snapshot.plays.len(), scoring = snapshot.scoring.len(), "Parsed game page");
	Ok(snapshot)
}

/// Game id a page was saved under: `401547353.html` is game `401547353`.
pub fn page_game_id(path: &Path) -> Result<GameId, AppError> {
	path.file_stem()
		.and_then(|stem| stem.to_str())
		.filter(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()))
		.map(GameId::new)
		.ok_or_else(|| AppError::invalid_page_name_error(path.display()))
}

pub fn read_page(path: &Path) -> Result<GameSnapshot, AppError> {
	let html = std::fs::read_to_string(path)?;
	parse_page(&html, &path.display().to_string())
}

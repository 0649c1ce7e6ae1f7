use crate::error::AppError;
use chrono::NaiveDateTime;
use nfl_alert_engine::{ClassifiedEvent, EventKind, Subtype};
use serde::Serialize;
use std::io::Write;

/// What a downstream notifier needs to text one owner about one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
	pub season: i32,
	pub owner_id: i64,
	pub owner_name: Option<String>,
	pub phone_number: Option<String>,
	pub player: String,
	pub team: String,
	pub opponent: String,
	pub game_date: NaiveDateTime,
	pub kind: EventKind,
	pub subtype: Subtype,
	pub yardage: u16,
	pub message: String,
}

impl From<&ClassifiedEvent> for AlertMessage {
	fn from(event: &ClassifiedEvent) -> Self {
		let participant = event.participant();

		AlertMessage {
			season: participant.season,
			owner_id: participant.owner_id,
			owner_name: participant.owner_name.clone(),
			phone_number: participant.phone_number.clone(),
			player: participant.player_name.clone(),
			team: participant.team_abbreviation.clone(),
			opponent: event.opponent_abbreviation().to_string(),
			game_date: participant.game_date,
			kind: event.kind(),
			subtype: event.subtype(),
			yardage: event.yardage(),
			message: event.message().to_string(),
		}
	}
}

/// Writes each alert as one JSON line.
pub fn deliver<W: Write>(out: &mut W, events: &[ClassifiedEvent]) -> Result<usize, AppError> {
	for event in events {
		serde_json::to_writer(&mut *out, &AlertMessage::from(event))?;
		out.write_all(b"\n")?;
	}
	out.flush()?;
	Ok(events.len())
}

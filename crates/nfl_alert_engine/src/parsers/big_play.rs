use crate::config::Thresholds;
use crate::error::{GameClockError, PlayTextError};
use crate::parsers::names;
use crate::schema::{gain_yards, ClassifiedEvent, Classification, ClockStamp, EventKind, GameId, PlayRecord, RosterEntry, Subtype};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

/// Descriptions carrying any of these are never big plays: punts, kickoffs,
/// penalties and interceptions are lookalikes, and touchdowns are alerted from
/// the scoring summary instead.
const EXCLUDED_MARKERS: [&str; 5] = ["punts", "penalty", "intercepted", "kicks", "touchdown"];

const FUMBLE_MARKER: &str = "fumbles";

pub const LOST_FUMBLE_NOTE: &str = "(FUMBLE - Lost ball on the play)";

/// The abbreviated name after the first `to` that follows `pass`:
/// `K.Cousins pass short middle to D.Cook to MIN 26 ...` gives `D.Cook`.
static RECEIVER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)pass\b.*?\bto\s+(?P<receiver>[A-Za-z'-]+\.[A-Za-z'.-]*[A-Za-z])").expect("receiver pattern"));

/// `recovered by MIA-T.Hill` gives `MIA`.
static RECOVERED_BY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)recovered by (?P<team>[A-Za-z]+)-").expect("recovery pattern"));

/// Decides whether a single play description is a rushing, receiving or
/// passing big play for any rostered participant.
///
/// A description that is excluded, or whose gain falls below every
/// threshold, yields an empty classification. An `Err` means a marker the
/// rules rely on was missing and the record should be skipped for this poll.
pub fn classify_play(game_id: &GameId, play: &PlayRecord, roster: &[RosterEntry], thresholds: &Thresholds) -> Result<Classification, PlayTextError> {
	let original = play.description.as_str();
	let lowered = original.to_ascii_lowercase();

	if !lowered.contains("yards") || EXCLUDED_MARKERS.iter().any(|marker| lowered.contains(marker)) {
		return Ok(Classification::none());
	}

	// forward progress after a fumble is never credited to the ball carrier
	let credited = lowered.find(FUMBLE_MARKER).map_or(original, |index| &original[..index]);

	let yards = gain_yards(credited)?;
	let yardage = match u16::try_from(yards) {
		Ok(yardage) if yardage >= thresholds.minimum() => yardage,
		_ => {
			debug!(sequence = play.sequence, yards, "Play below big play threshold");
			return Ok(Classification::none());
		}
	};

	let stamp = clock_stamp(credited)?;
	let lost_to = lowered.contains(FUMBLE_MARKER).then(|| recovering_team(original)).flatten();
	let pass_at = credited.to_ascii_lowercase().find("pass");

	let mut candidates = Vec::new();
	for participant in roster {
		let Some(abbreviated) = participant.abbreviated_name() else {
			continue;
		};
		let Some(position) = names::position_in(credited, &abbreviated) else {
			continue;
		};

		let subtype = match pass_at {
			Some(pass_at) if position < pass_at => Subtype::Pass,
			Some(_) => Subtype::Reception,
			None => Subtype::Rush,
		};
		if yardage < thresholds.for_subtype(subtype) {
			continue;
		}

		let name = &participant.player_name;
		let event = match subtype {
			Subtype::Pass => {
				let receiver = receiver_name(credited)?;
				let message = format!("🚀 Big play! {name} threw a pass of {yardage} yards to {receiver}!");
				ClassifiedEvent::new(game_id, EventKind::BigPlay, subtype, participant, yardage, stamp, message)
			}
			_ => {
				let message = match subtype {
					Subtype::Reception => format!("🚀 Big play! {name} caught a pass of {yardage} yards."),
					_ => format!("🚀 Big play! {name} rushed for {yardage} yards."),
				};
				let event = ClassifiedEvent::new(game_id, EventKind::BigPlay, subtype, participant, yardage, stamp, message);

				match lost_to {
					Some(team) if team.eq_ignore_ascii_case(&participant.opponent_abbreviation) => event.with_note(LOST_FUMBLE_NOTE),
					_ => event,
				}
			}
		};

		info!(game_id = %game_id, player = %name, subtype = %subtype, yardage, "{}", event.message());
		candidates.push((abbreviated, event));
	}

	Ok(Classification::from_candidates(candidates))
}

fn clock_stamp(text: &str) -> Result<ClockStamp, PlayTextError> {
	text.parse::<ClockStamp>().map_err(|error| match error {
		GameClockError::InvalidFormat(_) => PlayTextError::missing_clock_stamp(text),
		other => other.into(),
	})
}

fn receiver_name(text: &str) -> Result<&str, PlayTextError> {
	RECEIVER
		.captures(text)
		.and_then(|caps| caps.name("receiver"))
		.map(|receiver| receiver.as_str())
		.ok_or_else(|| PlayTextError::missing_receiver(text))
}

fn recovering_team(text: &str) -> Option<&str> {
	RECOVERED_BY.captures(text).and_then(|caps| caps.name("team")).map(|team| team.as_str())
}

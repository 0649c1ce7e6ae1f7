use crate::error::PlayTextError;
use crate::parsers::names;
use crate::schema::{
	touchdown_yards, ClassifiedEvent, Classification, ClockStamp, Diagnostic, EventKind, GameClock, GameId, GameSnapshot, Quarter, RosterEntry,
	ScoringRecord, Subtype,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Both shapes of a passing touchdown summary:
///
/// - live: `George Kittle Pass From Brock Purdy for 28 Yds, R.Gould extra point is GOOD, ...`
/// - final: `Tyreek Hill 60 Yd pass from Tua Tagovailoa (Jason Sanders Kick)`
///
/// `receiver` excludes the yardage phrase of the final shape; `passer` stops
/// at `for <n> Yds`, `(`, `,` or the end of the text.
static PASS_TOUCHDOWN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)^(?P<receiver>.+?)(?:\s+\d+\s+yds?)?\s+pass\s+from\s+(?P<passer>.+?)(?:\s+for\s+\d+\s+yds?\b|\s*[(,]|\s*$)").expect("pass touchdown pattern")
});

struct PassingPair<'a> {
	receiver: &'a str,
	passer: &'a str,
}

fn passing_pair(text: &str) -> Option<PassingPair<'_>> {
	let caps = PASS_TOUCHDOWN.captures(text)?;
	let receiver = caps.name("receiver")?.as_str().trim();
	let passer = caps.name("passer")?.as_str().trim();

	(!receiver.is_empty() && !passer.is_empty()).then_some(PassingPair { receiver, passer })
}

fn defensive_subtype(lowered: &str) -> Option<Subtype> {
	if lowered.contains("blocked kick") {
		Some(Subtype::DefensiveBlockedKick)
	} else if lowered.contains("interception return") {
		Some(Subtype::DefensiveInterceptionReturn)
	} else if lowered.contains("punt return") {
		Some(Subtype::DefensivePuntReturn)
	} else {
		None
	}
}

fn scoring_stamp(record: &ScoringRecord) -> Result<ClockStamp, PlayTextError> {
	let quarter = Quarter::from_period(record.period)?;
	let clock = record.clock.parse::<GameClock>()?;
	Ok(ClockStamp::new(clock, quarter))
}

/// Decides whether a scoring summary entry is a touchdown credited to a
/// rostered participant: an offensive scorer, the quarterback who threw it, or
/// a rostered defense.
pub fn classify_scoring(game_id: &GameId, record: &ScoringRecord, snapshot: &GameSnapshot, roster: &[RosterEntry]) -> Result<Classification, PlayTextError> {
	if !record.is_touchdown() {
		return Ok(Classification::none());
	}

	let stamp = scoring_stamp(record)?;
	let lowered = record.description.to_ascii_lowercase();

	match defensive_subtype(&lowered) {
		Some(subtype) => Ok(classify_defensive(game_id, record, snapshot, roster, subtype, stamp)),
		None => classify_offensive(game_id, record, roster, stamp),
	}
}

fn classify_defensive(game_id: &GameId, record: &ScoringRecord, snapshot: &GameSnapshot, roster: &[RosterEntry], subtype: Subtype, stamp: ClockStamp) -> Classification {
	let Some(team) = record.team_id.as_deref().and_then(|team_id| snapshot.team_name(team_id)) else {
		warn!(game_id = %game_id, team_id = ?record.team_id, "Defensive score by a team missing from the game strip");
		return Classification::none().with_diagnostic(Diagnostic::UnknownScoringTeam {
			team_id: record.team_id.clone(),
			text: record.description.clone(),
		});
	};

	// Blocked Kick Recovered by JoJo Domann (IND), ... carries no yardage
	let yardage = touchdown_yards(&record.description).unwrap_or(0);

	let candidates: Vec<(String, ClassifiedEvent)> = roster
		.iter()
		.filter(|participant| participant.is_named(team))
		.map(|defense| {
			let name = &defense.player_name;
			let message = match subtype {
				Subtype::DefensiveBlockedKick => format!("🎉 Defensive Touchdown! {name} blocked a kick and returned it for a TD!"),
				Subtype::DefensiveInterceptionReturn => format!("🎉 Defensive Touchdown! {name} just got a pick 6!"),
				_ => format!("🎉 Defensive Touchdown! {name} just returned a punt for a TD!"),
			};
			info!(game_id = %game_id, defense = %name, subtype = %subtype, "{message}");
			(team.to_string(), ClassifiedEvent::new(game_id, EventKind::Touchdown, subtype, defense, yardage, stamp, message))
		})
		.collect();

	if candidates.is_empty() {
		debug!(game_id = %game_id, team, "No owner has this defense");
		return Classification::none().with_diagnostic(Diagnostic::NoRosteredDefense { team: team.to_string() });
	}

	Classification::from_candidates(candidates)
}

fn classify_offensive(game_id: &GameId, record: &ScoringRecord, roster: &[RosterEntry], stamp: ClockStamp) -> Result<Classification, PlayTextError> {
	let text = record.description.as_str();
	let lowered = text.to_ascii_lowercase();
	let mut candidates = Vec::new();
	let mut diagnostics = Vec::new();

	for participant in roster {
		let name = participant.player_name.as_str();

		let event = if names::leads_with(text, name) {
			let yardage = touchdown_yards(text)?;

			let (subtype, message) = if let Some(pair) = passing_pair(text) {
				(Subtype::Reception, format!("🎉 Touchdown! {name} caught a {yardage} yard TD from {}!", pair.passer))
			} else if lowered.contains("fumble recovery") {
				(Subtype::FumbleRecovery, format!("🎉 Touchdown! {name} recovered a fumble for a {yardage} yard TD!"))
			} else if lowered.contains("run") || lowered.contains("rush") {
				(Subtype::Rush, format!("🎉 Touchdown! {name} ran for a {yardage} yard TD!"))
			} else if lowered.contains("pass") {
				return Err(PlayTextError::missing_passer(text));
			} else {
				warn!(game_id = %game_id, player = %name, "Unknown touchdown type: {text}");
				diagnostics.push(Diagnostic::UnrecognizedTouchdown {
					participant: name.to_string(),
					text: text.to_string(),
				});
				continue;
			};

			ClassifiedEvent::new(game_id, EventKind::Touchdown, subtype, participant, yardage, stamp, message)
		} else if names::named_in_headline(text, name) {
			let Some(pair) = passing_pair(text) else {
				warn!(game_id = %game_id, player = %name, "Named in a touchdown that is not a pass: {text}");
				diagnostics.push(Diagnostic::UnrecognizedTouchdown {
					participant: name.to_string(),
					text: text.to_string(),
				});
				continue;
			};
			let yardage = touchdown_yards(text)?;
			let message = format!("🎉 Touchdown! {name} threw a {yardage} yard TD to {}!", pair.receiver);

			ClassifiedEvent::new(game_id, EventKind::Touchdown, Subtype::Pass, participant, yardage, stamp, message)
		} else {
			continue;
		};

		info!(game_id = %game_id, player = %name, subtype = %event.subtype(), "{}", event.message());
		candidates.push((name.to_string(), event));
	}

	let mut classification = Classification::from_candidates(candidates);
	classification.diagnostics.extend(diagnostics);
	Ok(classification)
}

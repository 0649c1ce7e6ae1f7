use crate::error::PlayTextError;
use crate::schema::{ClockStamp, EventKey, GameId, RosterEntry};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
	BigPlay,
	Touchdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
	Rush,
	Pass,
	Reception,
	FumbleRecovery,
	DefensiveBlockedKick,
	DefensiveInterceptionReturn,
	DefensivePuntReturn,
}

impl Subtype {
	pub fn is_defensive(self) -> bool {
		matches!(
			self,
			Subtype::DefensiveBlockedKick | Subtype::DefensiveInterceptionReturn | Subtype::DefensivePuntReturn
		)
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EventKind::BigPlay => f.write_str("big play"),
			EventKind::Touchdown => f.write_str("touchdown"),
		}
	}
}

impl fmt::Display for Subtype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Subtype::Rush => "rush",
			Subtype::Pass => "pass",
			Subtype::Reception => "reception",
			Subtype::FumbleRecovery => "fumble recovery",
			Subtype::DefensiveBlockedKick => "blocked kick return",
			Subtype::DefensiveInterceptionReturn => "interception return",
			Subtype::DefensivePuntReturn => "punt return",
		};
		f.write_str(label)
	}
}

/// An alertable occurrence attributed to one rostered participant.
///
/// Only the classifiers build these, and they guarantee a non-empty message
/// and a yardage that met the subtype's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEvent {
	kind: EventKind,
	subtype: Subtype,
	participant: RosterEntry,
	yardage: u16,
	stamp: ClockStamp,
	message: String,
	key: EventKey,
}

impl ClassifiedEvent {
	pub(crate) fn new(
		game_id: &GameId,
		kind: EventKind,
		subtype: Subtype,
		participant: &RosterEntry,
		yardage: u16,
		stamp: ClockStamp,
		message: String,
	) -> Self {
		let key = EventKey::derive(game_id, stamp, &participant.player_name);
		ClassifiedEvent {
			kind,
			subtype,
			participant: participant.clone(),
			yardage,
			stamp,
			message,
			key,
		}
	}

	/// Appends a trailing note such as a lost fumble.
	pub(crate) fn with_note(mut self, note: &str) -> Self {
		self.message.push(' ');
		self.message.push_str(note);
		self
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn subtype(&self) -> Subtype {
		self.subtype
	}

	pub fn participant(&self) -> &RosterEntry {
		&self.participant
	}

	pub fn yardage(&self) -> u16 {
		self.yardage
	}

	pub fn stamp(&self) -> ClockStamp {
		self.stamp
	}

	pub fn opponent_abbreviation(&self) -> &str {
		&self.participant.opponent_abbreviation
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn key(&self) -> &EventKey {
		&self.key
	}
}

/// How one role in a record (passer, receiver, rusher, scorer, defense)
/// resolved against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
	Unique(ClassifiedEvent),
	/// Several distinct participants matched the same role; the caller decides.
	Ambiguous(Vec<ClassifiedEvent>),
}

/// Where a record came from within a game's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordSource {
	Play { sequence: usize },
	Scoring { index: usize },
}

impl fmt::Display for RecordSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RecordSource::Play { sequence } => write!(f, "play #{sequence}"),
			RecordSource::Scoring { index } => write!(f, "scoring summary #{index}"),
		}
	}
}

/// Non-fatal findings raised while classifying a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
	/// An expected marker was missing; the record was skipped.
	ParseFailure { source: RecordSource, error: PlayTextError },
	/// A rostered scorer led the summary but no touchdown keyword matched.
	UnrecognizedTouchdown { participant: String, text: String },
	/// A defensive score by a team nobody has rostered.
	NoRosteredDefense { team: String },
	/// A defensive score whose team id is not in the game's team list.
	UnknownScoringTeam { team_id: Option<String>, text: String },
	/// Several participants competed for one role.
	Ambiguous { subtype: Subtype, candidates: Vec<String> },
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::ParseFailure { source, error } => write!(f, "skipped {source}: {error}"),
			Diagnostic::UnrecognizedTouchdown { participant, text } => write!(f, "unknown touchdown type for {participant}: {text}"),
			Diagnostic::NoRosteredDefense { team } => write!(f, "no owner has the {team} defense"),
			Diagnostic::UnknownScoringTeam { team_id, text } => write!(f, "scoring team {team_id:?} not in game strip: {text}"),
			Diagnostic::Ambiguous { subtype, candidates } => write!(f, "ambiguous {subtype} between {}", candidates.join(", ")),
		}
	}
}

/// Outcome of classifying one record.
///
/// No attributions means the record produced no event. A record may carry
/// more than one attribution when several roles score off it (the passer and
/// the receiver of the same completion).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
	pub attributions: Vec<Attribution>,
	pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
	pub fn none() -> Self {
		Classification::default()
	}

	pub fn is_none(&self) -> bool {
		self.attributions.is_empty()
	}

	pub(crate) fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
		self.diagnostics.push(diagnostic);
		self
	}

	/// Groups qualifying candidates by the name form that matched them, in the
	/// order they were found.
	///
	/// Each candidate is paired with that form: the abbreviated name for a play,
	/// the full name or team name for a scoring summary. Distinct players behind
	/// one form become [`Attribution::Ambiguous`]. Every other candidate is
	/// unique, including repeated rows for one player on several owners'
	/// rosters, which share a dedup key and are left to the ledger gate.
	pub(crate) fn from_candidates(candidates: Vec<(String, ClassifiedEvent)>) -> Self {
		let mut groups: Vec<(String, Vec<ClassifiedEvent>)> = Vec::new();

		for (matched, candidate) in candidates {
			match groups.iter_mut().find(|(form, _)| *form == matched) {
				Some((_, group)) => group.push(candidate),
				None => groups.push((matched, vec![candidate])),
			}
		}

		let mut attributions = Vec::new();
		for (_, group) in groups {
			let contested = group
				.first()
				.is_some_and(|first| group.iter().any(|other| !other.participant.is_named(&first.participant.player_name)));

			if contested {
				attributions.push(Attribution::Ambiguous(group));
			} else {
				attributions.extend(group.into_iter().map(Attribution::Unique));
			}
		}

		Classification {
			attributions,
			diagnostics: Vec::new(),
		}
	}

	/// Every event in the classification, ambiguous candidates included.
	pub fn events(&self) -> impl Iterator<Item = &ClassifiedEvent> {
		self.attributions.iter().flat_map(|attribution| match attribution {
			Attribution::Unique(event) => std::slice::from_ref(event).iter(),
			Attribution::Ambiguous(candidates) => candidates.iter(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::names::abbreviate;
	use crate::schema::roster::fixtures::entry;
	use std::str::FromStr;

	fn event(name: &str, subtype: Subtype) -> ClassifiedEvent {
		let stamp = ClockStamp::from_str("(9:12 - 1st)").unwrap();
		ClassifiedEvent::new(
			&GameId::new("1"),
			EventKind::BigPlay,
			subtype,
			&entry(name, "ARI", "NE"),
			30,
			stamp,
			format!("{name} did it"),
		)
	}

	fn candidate(name: &str, subtype: Subtype) -> (String, ClassifiedEvent) {
		(abbreviate(name).unwrap(), event(name, subtype))
	}

	#[test]
	fn test_distinct_roles_are_unique() {
		let classification = Classification::from_candidates(vec![candidate("Kyler Murray", Subtype::Pass), candidate("Marvin Harrison", Subtype::Reception)]);

		assert_eq!(classification.attributions.len(), 2);
		assert!(classification.attributions.iter().all(|a| matches!(a, Attribution::Unique(_))));
		assert_eq!(classification.events().count(), 2);
	}

	#[test]
	fn test_competing_participants_are_ambiguous() {
		let classification = Classification::from_candidates(vec![candidate("Javonte Williams", Subtype::Rush), candidate("Jamaal Williams", Subtype::Rush)]);

		assert_eq!(classification.attributions.len(), 1);
		match &classification.attributions[0] {
			Attribution::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
			other => panic!("expected ambiguity, got {other:?}"),
		}
	}

	#[test]
	fn test_different_names_in_one_role_are_unique() {
		let classification = Classification::from_candidates(vec![candidate("Alvin Kamara", Subtype::Reception), candidate("Chris Olave", Subtype::Reception)]);

		let names: Vec<_> = classification
			.attributions
			.iter()
			.map(|attribution| match attribution {
				Attribution::Unique(event) => event.participant().player_name.as_str(),
				other => panic!("expected unique, got {other:?}"),
			})
			.collect();
		assert_eq!(names, vec!["Alvin Kamara", "Chris Olave"]);
	}

	#[test]
	fn test_same_player_on_two_rosters_keeps_both_rows() {
		let classification = Classification::from_candidates(vec![candidate("James Conner", Subtype::Rush), candidate("James Conner", Subtype::Rush)]);

		match classification.attributions.as_slice() {
			[Attribution::Unique(first), Attribution::Unique(second)] => assert_eq!(first.key(), second.key()),
			other => panic!("expected two unique rows, got {other:?}"),
		}
	}

	#[test]
	fn test_note_is_appended() {
		let noted = event("James Conner", Subtype::Rush).with_note("(FUMBLE - Lost ball on the play)");
		assert_eq!(noted.message(), "James Conner did it (FUMBLE - Lost ball on the play)");
	}

	#[test]
	fn test_empty_classification_is_none() {
		assert!(Classification::none().is_none());
		assert!(Classification::from_candidates(Vec::new()).is_none());
	}
}

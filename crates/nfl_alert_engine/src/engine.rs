use crate::config::{AmbiguityPolicy, EngineConfig};
use crate::error::{EngineError, PlayTextError};
use crate::parsers::{classify_play, classify_scoring};
use crate::schema::{Attribution, ClassifiedEvent, Classification, Diagnostic, EventKey, GameId, GameSnapshot, RecordSource, RosterEntry};
use std::collections::HashSet;
use std::convert::Infallible;
use tracing::{debug, info, warn};

/// The "already recorded" gate, keyed by [`EventKey`].
///
/// Implementations own persistence. The engine only asks and records, one
/// event at a time, in the order events were classified.
pub trait AlertLedger {
	type Error: std::error::Error + Send + Sync + 'static;

	fn is_recorded(&self, key: &EventKey) -> bool;

	fn record(&mut self, event: &ClassifiedEvent) -> Result<(), Self::Error>;
}

/// Ledger that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
	keys: HashSet<EventKey>,
}

impl InMemoryLedger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

impl AlertLedger for InMemoryLedger {
	type Error = Infallible;

	fn is_recorded(&self, key: &EventKey) -> bool {
		self.keys.contains(key)
	}

	fn record(&mut self, event: &ClassifiedEvent) -> Result<(), Self::Error> {
		self.keys.insert(event.key().clone());
		Ok(())
	}
}

/// Every candidate event of one game in one poll, before the ledger gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedGame {
	pub game_id: GameId,
	pub candidates: Vec<ClassifiedEvent>,
	pub diagnostics: Vec<Diagnostic>,
}

/// What one game produced after the ledger gate.
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
	pub game_id: GameId,
	/// New events, in classification order, now recorded in the ledger.
	pub emitted: Vec<ClassifiedEvent>,
	/// Keys that were already recorded by an earlier poll or record.
	pub suppressed: Vec<EventKey>,
	pub diagnostics: Vec<Diagnostic>,
}

impl ClassifiedGame {
	/// Filters the candidates through `ledger`, recording each new one.
	///
	/// A ledger failure aborts the game; events recorded before it stay recorded.
	pub fn apply_ledger<L: AlertLedger>(self, ledger: &mut L) -> Result<GameReport, EngineError> {
		let mut emitted = Vec::new();
		let mut suppressed = Vec::new();

		for event in self.candidates {
			if ledger.is_recorded(event.key()) {
				debug!(game_id = %self.game_id, key = %event.key(), "Already alerted");
				suppressed.push(event.key().clone());
				continue;
			}

			ledger.record(&event).map_err(|e| EngineError::ledger_error(&self.game_id, e))?;
			emitted.push(event);
		}

		info!(game_id = %self.game_id, emitted = emitted.len(), suppressed = suppressed.len(), "Game done");
		Ok(GameReport {
			game_id: self.game_id,
			emitted,
			suppressed,
			diagnostics: self.diagnostics,
		})
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertEngine {
	config: EngineConfig,
}

impl AlertEngine {
	pub fn new(config: EngineConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Runs both classifiers over every record of one game.
	///
	/// Plays come first in feed order, then the scoring summary. A record that
	/// fails to parse is skipped with a [`Diagnostic::ParseFailure`].
	pub fn classify_game(&self, game_id: &GameId, snapshot: &GameSnapshot, roster: &[RosterEntry]) -> ClassifiedGame {
		let mut game = ClassifiedGame {
			game_id: game_id.clone(),
			candidates: Vec::new(),
			diagnostics: Vec::new(),
		};

		if snapshot.is_empty() {
			debug!(game_id = %game_id, "No records yet");
		}

		for play in &snapshot.plays {
			let source = RecordSource::Play { sequence: play.sequence };
			let outcome = classify_play(game_id, play, roster, &self.config.thresholds);
			self.collect(&mut game, source, outcome);
		}

		for (index, record) in snapshot.scoring.iter().enumerate() {
			let source = RecordSource::Scoring { index };
			let outcome = classify_scoring(game_id, record, snapshot, roster);
			self.collect(&mut game, source, outcome);
		}

		game
	}

	/// [`classify_game`](Self::classify_game) followed by the ledger gate.
	pub fn process_game<L: AlertLedger>(&self, game_id: &GameId, snapshot: &GameSnapshot, roster: &[RosterEntry], ledger: &mut L) -> Result<GameReport, EngineError> {
		self.classify_game(game_id, snapshot, roster).apply_ledger(ledger)
	}

	fn collect(&self, game: &mut ClassifiedGame, source: RecordSource, outcome: Result<Classification, PlayTextError>) {
		let classification = match outcome {
			Ok(classification) => classification,
			Err(error) => {
				warn!(game_id = %game.game_id, %source, %error, "Skipping record");
				game.diagnostics.push(Diagnostic::ParseFailure { source, error });
				return;
			}
		};

		game.diagnostics.extend(classification.diagnostics);

		for attribution in classification.attributions {
			match attribution {
				Attribution::Unique(event) => game.candidates.push(event),
				Attribution::Ambiguous(candidates) => self.resolve_ambiguity(game, candidates),
			}
		}
	}

	fn resolve_ambiguity(&self, game: &mut ClassifiedGame, candidates: Vec<ClassifiedEvent>) {
		let Some(subtype) = candidates.first().map(ClassifiedEvent::subtype) else {
			return;
		};
		let mut names: Vec<String> = Vec::new();
		for event in &candidates {
			let name = &event.participant().player_name;
			if !names.contains(name) {
				names.push(name.clone());
			}
		}

		warn!(game_id = %game.game_id, %subtype, candidates = ?names, policy = ?self.config.ambiguity, "Ambiguous attribution");
		game.diagnostics.push(Diagnostic::Ambiguous { subtype, candidates: names });

		match self.config.ambiguity {
			AmbiguityPolicy::Skip => {}
			AmbiguityPolicy::FirstInRosterOrder => game.candidates.extend(candidates.into_iter().next()),
			AmbiguityPolicy::All => game.candidates.extend(candidates),
		}
	}
}

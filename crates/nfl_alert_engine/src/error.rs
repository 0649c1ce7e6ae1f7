use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GameClockError {
	#[error("Invalid quarter: {quarter}")]
	InvalidQuarter { quarter: String },

	#[error("Invalid minutes: {minutes}, must be between 0 and 15")]
	InvalidMinutes { minutes: u8 },

	#[error("Invalid seconds: {seconds}, must be between 0 and 59")]
	InvalidSeconds { seconds: u8 },

	#[error("Failed to parse game clock format: {0}")]
	InvalidFormat(String),

	#[error("Parse error occurred for number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum YardsError {
	#[error("Invalid yards description: {0}")]
	InvalidYardsFormat(String),

	#[error("No yards information found in: {0}")]
	NoYardsInfo(String),
}

/// A marker the rule set relies on was missing from a record's text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlayTextError {
	#[error("Missing clock stamp in play text: {text}")]
	MissingClockStamp { text: String },

	#[error("Missing receiver after pass in play text: {text}")]
	MissingReceiver { text: String },

	#[error("Missing passer in touchdown text: {text}")]
	MissingPasser { text: String },

	#[error("Game clock error: {0}")]
	GameClock(#[from] GameClockError),

	#[error("Yards error: {0}")]
	Yards(#[from] YardsError),
}

#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Alert ledger failed for game {game_id}: {source}")]
	Ledger {
		game_id: String,
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

impl GameClockError {
	pub fn invalid_quarter_error(quarter: &str) -> Self {
		GameClockError::InvalidQuarter { quarter: quarter.to_string() }
	}

	pub fn invalid_minutes_error(minutes: u8) -> Self {
		GameClockError::InvalidMinutes { minutes }
	}

	pub fn invalid_seconds_error(seconds: u8) -> Self {
		GameClockError::InvalidSeconds { seconds }
	}

	pub fn invalid_format_error(input: &str) -> Self {
		GameClockError::InvalidFormat(input.to_string())
	}
}

impl PlayTextError {
	pub fn missing_clock_stamp(text: &str) -> Self {
		PlayTextError::MissingClockStamp { text: text.to_string() }
	}

	pub fn missing_receiver(text: &str) -> Self {
		PlayTextError::MissingReceiver { text: text.to_string() }
	}

	pub fn missing_passer(text: &str) -> Self {
		PlayTextError::MissingPasser { text: text.to_string() }
	}
}

impl EngineError {
	pub fn ledger_error<E>(game_id: impl ToString, source: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		EngineError::Ledger {
			game_id: game_id.to_string(),
			source: Box::new(source),
		}
	}
}

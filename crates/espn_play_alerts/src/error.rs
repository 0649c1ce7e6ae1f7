use nfl_alert_engine::EngineError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
	#[error("Failed to parse HTML")]
	HtmlParseError,

	#[error("No play-by-play payload in page: {page}")]
	MissingPayload { page: String },

	#[error("Page file name is not a game id: {path}")]
	InvalidPageName { path: String },

	#[error("Invalid roster row for {player}: {reason}")]
	InvalidRosterRow { player: String, reason: String },

	#[error("Invalid ledger row for {participant}: {reason}")]
	InvalidLedgerRow { participant: String, reason: String },

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error(transparent)]
	CsvError(#[from] csv::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Engine(#[from] EngineError),

	#[error("Game task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

impl AppError {
	pub fn missing_payload_error(page: impl ToString) -> Self {
		AppError::MissingPayload { page: page.to_string() }
	}

	pub fn invalid_page_name_error(path: impl ToString) -> Self {
		AppError::InvalidPageName { path: path.to_string() }
	}

	pub fn invalid_roster_row_error(player: &str, reason: impl ToString) -> Self {
		AppError::InvalidRosterRow {
			player: player.to_string(),
			reason: reason.to_string(),
		}
	}

	pub fn invalid_ledger_row_error(participant: &str, reason: impl ToString) -> Self {
		AppError::InvalidLedgerRow {
			participant: participant.to_string(),
			reason: reason.to_string(),
		}
	}
}

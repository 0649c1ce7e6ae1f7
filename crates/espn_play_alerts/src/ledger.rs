use crate::error::AppError;
use chrono::Utc;
use nfl_alert_engine::schema::{GameClock, Quarter};
use nfl_alert_engine::{AlertLedger, ClassifiedEvent, EventKey, GameId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LedgerRow {
	game_id: String,
	quarter: u8,
	clock: String,
	participant: String,
	season: i32,
	owner_id: i64,
	opponent: String,
	game_date: String,
	kind: String,
	recorded_at: String,
}

impl LedgerRow {
	fn from_event(event: &ClassifiedEvent) -> Self {
		let key = event.key();
		let participant = event.participant();

		LedgerRow {
			game_id: key.game_id.to_string(),
			quarter: key.quarter.number(),
			clock: key.clock.to_string(),
			participant: key.participant.clone(),
			season: participant.season,
			owner_id: participant.owner_id,
			opponent: event.opponent_abbreviation().to_string(),
			game_date: participant.game_date.format("%Y-%m-%d %H:%M:%S").to_string(),
			kind: event.kind().to_string(),
			recorded_at: Utc::now().to_rfc3339(),
		}
	}

	fn key(&self) -> Result<EventKey, AppError> {
		let quarter = Quarter::from_period(self.quarter).map_err(|e| AppError::invalid_ledger_row_error(&self.participant, e))?;
		let clock = self.clock.parse::<GameClock>().map_err(|e| AppError::invalid_ledger_row_error(&self.participant, e))?;

		Ok(EventKey {
			game_id: GameId::new(self.game_id.as_str()),
			quarter,
			clock,
			participant: self.participant.clone(),
		})
	}
}

/// Append-only CSV of every alert sent, keyed by [`EventKey`].
///
/// The whole file is read into memory on open; each new event is appended and
/// flushed before [`AlertLedger::record`] returns.
pub struct CsvLedger {
	path: PathBuf,
	keys: HashSet<EventKey>,
	writer: csv::Writer<File>,
}

impl CsvLedger {
	/// Loads every recorded key and positions the writer after the last row.
	///
	/// A last line cut short by a crash is dropped so the next row starts on
	/// a fresh line. A complete last row that only lacks its newline is kept.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
		let path = path.as_ref().to_path_buf();
		repair_last_line(&path)?;
		let file = OpenOptions::new().append(true).create(true).read(true).open(&path)?;

		let is_empty = file.metadata().map(|m| m.len() == 0).unwrap_or(true);

		let mut keys = HashSet::new();
		if !is_empty {
			let mut reader = csv::Reader::from_path(&path)?;
			for row in reader.deserialize::<LedgerRow>() {
				keys.insert(row?.key()?);
			}
		}

		let writer = csv::WriterBuilder::new().has_headers(is_empty).from_writer(file);

		info!(path = %path.display(), recorded = keys.len(), "Opened alert ledger");
		Ok(CsvLedger { path, keys, writer })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

fn repair_last_line(path: &Path) -> Result<(), AppError> {
	let contents = match fs::read(path) {
		Ok(contents) => contents,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
		Err(e) => return Err(e.into()),
	};
	if contents.is_empty() || contents.ends_with(b"\n") {
		return Ok(());
	}

	let line_start = contents.iter().rposition(|&b| b == b'\n').map_or(0, |newline| newline + 1);
	let last_line = &contents[line_start..];
	let complete_row = line_start > 0
		&& csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(last_line)
			.deserialize::<LedgerRow>()
			.next()
			.is_some_and(|row| row.is_ok_and(|row| row.key().is_ok()));

	let mut file = OpenOptions::new().write(true).open(path)?;
	if complete_row {
		file.seek(SeekFrom::End(0))?;
		file.write_all(b"\n")?;
	} else {
		warn!(path = %path.display(), bytes = last_line.len(), "Dropping a partly written ledger row");
		file.set_len(line_start as u64)?;
	}
	Ok(())
}

impl AlertLedger for CsvLedger {
	type Error = AppError;

	fn is_recorded(&self, key: &EventKey) -> bool {
		self.keys.contains(key)
	}

	fn record(&mut self, event: &ClassifiedEvent) -> Result<(), Self::Error> {
		self.writer.serialize(LedgerRow::from_event(event))?;
		self.writer.flush()?;
		self.keys.insert(event.key().clone());

		debug!(key = %event.key(), "Recorded alert");
		Ok(())
	}
}

pub mod config;
pub mod delivery;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod roster;

use crate::config::Config;
use crate::error::AppError;
use crate::ledger::CsvLedger;
use crate::roster::LiveGame;
use futures::future::join_all;
use nfl_alert_engine::{AlertEngine, ClassifiedGame, GameId};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Counts for one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
	pub games: usize,
	pub failed_games: usize,
	pub emitted: usize,
	pub suppressed: usize,
	pub diagnostics: usize,
}

/// Runs one poll: picks the live games, classifies each page concurrently,
/// then gates and delivers the alerts one game at a time.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<PollSummary, AppError> {
	let rows = roster::read_roster(&config.roster)?;
	let live = roster::live_games(rows, config.now())?;
	info!(games = live.len(), "Live games");

	let pages = index_pages(&config.pages);
	let engine = AlertEngine::new(config.engine_config());

	let tasks = live.into_iter().filter_map(|game| {
		let Some(page) = pages.get(&game.game_id).cloned() else {
			warn!(game_id = %game.game_id, "No saved page for live game");
			return None;
		};
		Some(classify_page(engine, game, page))
	});
	let classified = join_all(tasks).await;

	let mut summary = PollSummary::default();
	let mut ledger = CsvLedger::open(&config.ledger)?;

	for outcome in classified {
		summary.games += 1;

		let game = match outcome {
			Ok(game) => game,
			Err(e) => {
				error!(error = %e, "Skipping game");
				summary.failed_games += 1;
				continue;
			}
		};

		let game_id = game.game_id.clone();
		let report = match game.apply_ledger(&mut ledger) {
			Ok(report) => report,
			Err(e) => {
				error!(game_id = %game_id, error = %e, "Alert ledger failed");
				summary.failed_games += 1;
				continue;
			}
		};

		summary.emitted += delivery::deliver(out, &report.emitted)?;
		summary.suppressed += report.suppressed.len();
		summary.diagnostics += report.diagnostics.len();
	}

	info!(?summary, "Poll done");
	Ok(summary)
}

async fn classify_page(engine: AlertEngine, game: LiveGame, page: PathBuf) -> Result<ClassifiedGame, AppError> {
	tokio::task::spawn_blocking(move || -> Result<ClassifiedGame, AppError> {
		let snapshot = feed::read_page(&page)?;
		Ok(engine.classify_game(&game.game_id, &snapshot, &game.roster))
	})
	.await?
}

fn index_pages(pages: &[PathBuf]) -> HashMap<GameId, PathBuf> {
	pages
		.iter()
		.filter_map(|page| match feed::page_game_id(page) {
			Ok(game_id) => Some((game_id, page.clone())),
			Err(e) => {
				warn!(error = %e, "Ignoring page");
				None
			}
		})
		.inspect(|(game_id, page)| debug!(game_id = %game_id, page = %page.display(), "Indexed page"))
		.collect()
}

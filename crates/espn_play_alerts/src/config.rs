use chrono::{Local, NaiveDateTime};
use clap::Parser;
use nfl_alert_engine::{AmbiguityPolicy, EngineConfig, Thresholds};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(name = "espn_play_alerts")]
#[command(about = "Turns saved ESPN play-by-play pages into fantasy alerts", long_about = None)]
pub struct Config {
	/// Saved game pages, each named `<espn game id>.html`
	#[arg(long = "page", env = "PLAY_BY_PLAY_PAGE", value_delimiter = ',', required = true)]
	pub pages: Vec<PathBuf>,

	/// Weekly roster export
	#[arg(long, env = "ROSTER_CSV")]
	pub roster: PathBuf,

	/// Append-only record of alerts already sent
	#[arg(long, env = "ALERT_LEDGER", default_value = "alert_ledger.csv")]
	pub ledger: PathBuf,

	#[arg(long, env = "RUSH_YARDS", default_value = "25")]
	pub rush_yards: u16,

	#[arg(long, env = "RECEPTION_YARDS", default_value = "25")]
	pub reception_yards: u16,

	#[arg(long, env = "PASS_YARDS", default_value = "40")]
	pub pass_yards: u16,

	/// skip, first or all
	#[arg(long, env = "AMBIGUITY", default_value = "skip")]
	pub ambiguity: AmbiguityPolicy,

	/// Poll as if it were this time (`2024-09-08 13:00:00`), for replaying old pages
	#[arg(long, env = "ALERT_NOW", value_parser = parse_now)]
	pub now: Option<NaiveDateTime>,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,
}

impl Config {
	pub fn engine_config(&self) -> EngineConfig {
		EngineConfig {
			thresholds: Thresholds {
				rush: self.rush_yards,
				reception: self.reception_yards,
				pass: self.pass_yards,
			},
			ambiguity: self.ambiguity,
		}
	}

	pub fn now(&self) -> NaiveDateTime {
		self.now.unwrap_or_else(|| Local::now().naive_local())
	}
}

/// Accepts `2024-09-08 13:00:00` and `2024-09-08T13:00:00`.
pub fn parse_now(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
	NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").or_else(|_| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S"))
}

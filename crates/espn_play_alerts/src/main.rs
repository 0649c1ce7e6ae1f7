use anyhow::Context;
use clap::Parser;
use espn_play_alerts::config::Config;
use std::str::FromStr;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, layer::SubscriberExt, util::SubscriberInitExt, Layer};

const DEFAULT_FILTER: &str = "espn_play_alerts=info,nfl_alert_engine=info";

fn init_tracing(config: &Config) -> anyhow::Result<()> {
	let filter = EnvFilter::from_str(config.rust_log.as_deref().unwrap_or(DEFAULT_FILTER)).context("invalid RUST_LOG")?;

	// stdout carries the alerts
	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.init();
	Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();

	let config = Config::parse();
	init_tracing(&config)?;

	let mut stdout = std::io::stdout().lock();
	let summary = espn_play_alerts::run(&config, &mut stdout).await?;

	if summary.failed_games > 0 {
		tracing::warn!(failed = summary.failed_games, "Some games were skipped this poll");
	}
	Ok(())
}

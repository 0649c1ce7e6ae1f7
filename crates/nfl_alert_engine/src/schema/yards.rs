use crate::error::YardsError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `for 23 yards` / `for -5 yards` inside a play description.
static GAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i) for (-?\d+) yards").expect("gain pattern"));

/// Yards gained on a rushing, passing or receiving play description.
///
/// A description without the word `yards` (`for no gain`, `for 1 yard`,
/// incomplete passes) is a zero-yard play. When `yards` is present the number
/// must sit between ` for ` and `yards`; anything else is an extraction failure.
pub fn gain_yards(description: &str) -> Result<i32, YardsError> {
	if !description.to_ascii_lowercase().contains("yards") {
		return Ok(0);
	}

	let caps = GAIN.captures(description).ok_or_else(|| YardsError::NoYardsInfo(description.to_string()))?;
	caps[1].parse::<i32>().map_err(|_| YardsError::InvalidYardsFormat(description.to_string()))
}

/// Yardage of a scoring summary entry: the first whitespace-delimited token
/// that is an integer (`Tyreek Hill 60 Yd pass from ...`,
/// `George Kittle Pass From Brock Purdy for 28 Yds, ...`).
pub fn touchdown_yards(description: &str) -> Result<u16, YardsError> {
	description
		.split_whitespace()
		.find_map(|word| word.parse::<u16>().ok())
		.ok_or_else(|| YardsError::NoYardsInfo(description.to_string()))
}

use crate::error::GameClockError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leading `(<clock> - <quarter>)` stamp of a play description, e.g. `(9:12 - 1st)`.
static CLOCK_STAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\((?P<clock>[^\s()]+) - (?P<quarter>[^)]*)\)").expect("clock stamp pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
	First,
	Second,
	Third,
	Fourth,
	OT,
}

impl Quarter {
	/// Period number as stored alongside alerts; overtime is 5.
	pub fn number(self) -> u8 {
		match self {
			Quarter::First => 1,
			Quarter::Second => 2,
			Quarter::Third => 3,
			Quarter::Fourth => 4,
			Quarter::OT => 5,
		}
	}

	/// Maps a scoring summary `periodNum` onto a quarter.
	pub fn from_period(period: u8) -> Result<Self, GameClockError> {
		match period {
			1 => Ok(Quarter::First),
			2 => Ok(Quarter::Second),
			3 => Ok(Quarter::Third),
			4 => Ok(Quarter::Fourth),
			5 => Ok(Quarter::OT),
			_ => Err(GameClockError::invalid_quarter_error(&period.to_string())),
		}
	}
}

impl FromStr for Quarter {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"1st" => Ok(Quarter::First),
			"2nd" => Ok(Quarter::Second),
			"3rd" => Ok(Quarter::Third),
			"4th" => Ok(Quarter::Fourth),
			"OT" => Ok(Quarter::OT),
			_ => Err(GameClockError::invalid_quarter_error(s)),
		}
	}
}

impl fmt::Display for Quarter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Quarter::First => "1st",
			Quarter::Second => "2nd",
			Quarter::Third => "3rd",
			Quarter::Fourth => "4th",
			Quarter::OT => "OT",
		};
		f.write_str(label)
	}
}

/// Struct to represent minutes (valid range: 0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Minutes(u8);

impl Minutes {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value > 15 {
			Err(GameClockError::invalid_minutes_error(value))
		} else {
			Ok(Minutes(value))
		}
	}
}

impl FromStr for Minutes {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		// ESPN drops the leading zero minute inside the final minute, e.g. ":34"
		if s.is_empty() {
			return Ok(Minutes(0));
		}
		let value = s.parse::<u8>()?;
		Minutes::new(value)
	}
}

/// Struct to represent seconds (valid range: 0-59)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seconds(u8);

impl Seconds {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value >= 60 {
			Err(GameClockError::invalid_seconds_error(value))
		} else {
			Ok(Seconds(value))
		}
	}
}

impl FromStr for Seconds {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = s.parse::<u8>()?;
		Seconds::new(value)
	}
}

/// Time remaining in the period, resolved to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameClock {
	minutes: Minutes,
	seconds: Seconds,
}

impl GameClock {
	pub fn new(minutes: Minutes, seconds: Seconds) -> Self {
		GameClock { minutes, seconds }
	}
}

impl FromStr for GameClock {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (minutes_str, seconds_str) = s.trim().split_once(':').ok_or_else(|| GameClockError::invalid_format_error(s))?;

		let minutes = minutes_str.parse::<Minutes>()?;
		let seconds = seconds_str.parse::<Seconds>()?;

		Ok(GameClock::new(minutes, seconds))
	}
}

impl fmt::Display for GameClock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{:02}", self.minutes.0, self.seconds.0)
	}
}

/// Clock and quarter at which a play happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockStamp {
	pub clock: GameClock,
	pub quarter: Quarter,
}

impl ClockStamp {
	pub fn new(clock: GameClock, quarter: Quarter) -> Self {
		ClockStamp { clock, quarter }
	}
}

impl FromStr for ClockStamp {
	type Err = GameClockError;

	/// Parses the stamp that opens every play description:
	/// `(9:12 - 1st) J.Conner up the middle ...`.
	///
	/// The clock is the text between `(` and the first space; the quarter is the
	/// token after ` - ` up to `)`. A quarter outside `1st..4th, OT` is an error,
	/// never a default.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let caps = CLOCK_STAMP.captures(s).ok_or_else(|| GameClockError::invalid_format_error(s))?;

		let clock = caps["clock"].parse::<GameClock>()?;
		let quarter = caps["quarter"].parse::<Quarter>()?;

		Ok(ClockStamp::new(clock, quarter))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_quarter_from_str() {
		assert_eq!(Quarter::from_str("1st"), Ok(Quarter::First));
		assert_eq!(Quarter::from_str("2nd"), Ok(Quarter::Second));
		assert_eq!(Quarter::from_str("3rd"), Ok(Quarter::Third));
		assert_eq!(Quarter::from_str("4th"), Ok(Quarter::Fourth));
		assert_eq!(Quarter::from_str("OT"), Ok(Quarter::OT));
		assert!(Quarter::from_str("5th").is_err());
	}

	#[test]
	fn test_overtime_is_period_five() {
		assert_eq!(Quarter::OT.number(), 5);
		assert_eq!(Quarter::from_period(5), Ok(Quarter::OT));
		assert_eq!(Quarter::from_period(6), Err(GameClockError::invalid_quarter_error("6")));
		assert_eq!(Quarter::from_period(0), Err(GameClockError::invalid_quarter_error("0")));
	}

	#[test]
	fn test_clock_stamp_from_str() {
		let test_cases = vec![
			("(14:32 - 1st)", Ok(ClockStamp::new(GameClock::new(Minutes(14), Seconds(32)), Quarter::First))),
			("(0:05 - 2nd)", Ok(ClockStamp::new(GameClock::new(Minutes(0), Seconds(5)), Quarter::Second))),
			("(7:15 - 3rd)", Ok(ClockStamp::new(GameClock::new(Minutes(7), Seconds(15)), Quarter::Third))),
			("(2:00 - 4th)", Ok(ClockStamp::new(GameClock::new(Minutes(2), Seconds(0)), Quarter::Fourth))),
			("(10:00 - OT)", Ok(ClockStamp::new(GameClock::new(Minutes(10), Seconds(0)), Quarter::OT))),
			("(:34 - 4th)", Ok(ClockStamp::new(GameClock::new(Minutes(0), Seconds(34)), Quarter::Fourth))),
			("(14:32 - 5th)", Err(GameClockError::invalid_quarter_error("5th"))),
			("(60:00 - 1st)", Err(GameClockError::invalid_minutes_error(60))),
			("(14:60 - 1st)", Err(GameClockError::invalid_seconds_error(60))),
			("14:32 - 1st", Err(GameClockError::invalid_format_error("14:32 - 1st"))),
			("(14:32 1st)", Err(GameClockError::invalid_format_error("(14:32 1st)"))),
		];

		for (input, expected) in test_cases {
			assert_eq!(ClockStamp::from_str(input), expected, "Failed for input: {}", input);
		}
	}

	#[test]
	fn test_clock_stamp_from_play_description() {
		let play_desc = "(14:32 - 1st) (No Huddle, Shotgun) K.Cousins pass deep right to K.Pitts to TB 36 for 32 yards (Z.McCollum).";
		let stamp = ClockStamp::from_str(play_desc).unwrap();

		assert_eq!(stamp.quarter, Quarter::First);
		assert_eq!(stamp.clock.to_string(), "14:32");
	}

	#[test]
	fn test_game_clock_is_rendered_canonically() {
		assert_eq!(GameClock::from_str("09:12").unwrap().to_string(), "9:12");
		assert_eq!(GameClock::from_str("9:02").unwrap().to_string(), "9:02");
		assert_eq!(GameClock::from_str("09:12"), GameClock::from_str("9:12"));
		assert!(GameClock::from_str("912").is_err());
	}
}

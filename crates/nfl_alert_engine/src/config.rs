use crate::schema::Subtype;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum gain, in yards, for a big-play alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
	pub rush: u16,
	pub reception: u16,
	/// Yardage a passer must throw for; higher than the catch threshold.
	pub pass: u16,
}

impl Default for Thresholds {
	fn default() -> Self {
		Self {
			rush: 25,
			reception: 25,
			pass: 40,
		}
	}
}

impl Thresholds {
	/// Threshold for a big-play subtype. Touchdowns have none.
	pub fn for_subtype(&self, subtype: Subtype) -> u16 {
		match subtype {
			Subtype::Rush => self.rush,
			Subtype::Reception => self.reception,
			Subtype::Pass => self.pass,
			_ => 0,
		}
	}

	/// Below this no big play of any kind can have happened.
	pub fn minimum(&self) -> u16 {
		self.rush.min(self.reception).min(self.pass)
	}
}

/// What the engine does with an [`Attribution::Ambiguous`](crate::schema::Attribution).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
	/// Log the ambiguity and emit nothing for that role.
	#[default]
	Skip,
	/// Emit the candidate that comes first in roster order.
	FirstInRosterOrder,
	/// Emit every candidate.
	All,
}

impl FromStr for AmbiguityPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"skip" => Ok(AmbiguityPolicy::Skip),
			"first" | "first-in-roster-order" => Ok(AmbiguityPolicy::FirstInRosterOrder),
			"all" => Ok(AmbiguityPolicy::All),
			other => Err(format!("unknown ambiguity policy: {other}")),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	pub thresholds: Thresholds,
	pub ambiguity: AmbiguityPolicy,
}

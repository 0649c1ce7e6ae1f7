use crate::schema::{ClockStamp, GameClock, GameId, Quarter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an alertable occurrence across polls.
///
/// Two observations of the same play (live text and its later, revised text)
/// share a key as long as game, quarter, clock and participant agree. Clock
/// resolution is one second, so two distinct same-second events for the same
/// participant collapse into one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventKey {
	pub game_id: GameId,
	pub quarter: Quarter,
	pub clock: GameClock,
	pub participant: String,
}

impl EventKey {
	pub fn derive(game_id: &GameId, stamp: ClockStamp, participant: &str) -> Self {
		EventKey {
			game_id: game_id.clone(),
			quarter: stamp.quarter,
			clock: stamp.clock,
			participant: participant.to_string(),
		}
	}
}

impl fmt::Display for EventKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}:{}", self.game_id, self.quarter.number(), self.clock, self.participant)
	}
}

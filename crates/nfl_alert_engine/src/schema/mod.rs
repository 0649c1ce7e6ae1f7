pub mod event;
pub mod event_key;
pub mod game_clock;
pub mod records;
pub mod roster;
pub mod yards;

pub use event::*;
pub use event_key::*;
pub use game_clock::*;
pub use records::*;
pub use roster::*;
pub use yards::*;

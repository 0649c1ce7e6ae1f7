pub mod big_play;
pub mod names;
pub mod touchdown;

pub use big_play::classify_play;
pub use touchdown::classify_scoring;

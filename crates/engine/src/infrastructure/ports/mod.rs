//! Port traits at the engine's infrastructure boundary.
//!
//! Two seams: character storage and the clock. Everything else in the engine
//! is concrete.

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::CharacterRepo;
pub use testing::ClockPort;
pub use types::CharacterRecord;

#[cfg(test)]
pub use repos::MockCharacterRepo;
#[cfg(test)]
pub use testing::MockClockPort;

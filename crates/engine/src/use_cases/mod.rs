//! Use cases - User story orchestration.

pub mod character;

pub use character::CharacterUseCases;

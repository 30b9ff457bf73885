//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//!
//! # Rustic DDD Principles
//!
//! | Concern | Rustic Equivalent |
//! |---------|-------------------|
//! | Field validation | Newtypes valid by construction |
//! | Aggregate root guards | Private fields + validate-before-mutate methods |
//! | Derived values | Computed on demand, never stored |

pub mod character;

pub use character::{Biography, Character, CharacterUpdate, Proficiencies};

//! Chronicle Engine library.
//!
//! Application layer around the character rules in `chronicle-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - Character record lifecycle and document transfer
//! - `stores/` - The open character session and user notifications
//! - `infrastructure/` - Ports, the SQLite adapter, autosave and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;

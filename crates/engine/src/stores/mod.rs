//! In-process state shared by the engine: the open character and the
//! notification list.

pub mod notifications;
pub mod session;

pub use notifications::{Notification, NotificationLevel, Notifications};
pub use session::CharacterSession;

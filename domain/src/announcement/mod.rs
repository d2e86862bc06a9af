//! Public announcements and private replies
//!
//! Everything the tribunal says is produced here so wording stays in one
//! place and can be tested without a platform.

pub mod message;
pub mod template;

pub use message::{Control, ControlStyle, OutgoingMessage};
pub use template::AnnouncementTemplate;

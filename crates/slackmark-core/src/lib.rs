//! Core domain models and output writers for slackmark
//!
//! This crate contains:
//! - Workspace records (Channel, User) as returned by the Slack Web API
//! - Netscape bookmark file writer
//! - Import guide writer (Japanese and English)

pub mod bookmark;
pub mod error;
pub mod guide;
pub mod i18n;
pub mod model;

pub use bookmark::BookmarkWriter;
pub use error::{CoreError, Result};
pub use guide::{GuideKind, GuideWriter, Platform};
pub use i18n::Language;
pub use model::{Channel, ChannelType, Profile, User};

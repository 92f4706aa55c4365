//! Slack Web API access: token check, channel and member listing

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{list_channels, list_users, SlackApi};
pub use client::SlackClient;
pub use error::{Result, SlackError};
pub use types::{AuthInfo, Page};

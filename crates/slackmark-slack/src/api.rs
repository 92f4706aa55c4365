use async_trait::async_trait;
use slackmark_core::{Channel, ChannelType, User};
use tracing::info;

use crate::{AuthInfo, Page, Result};

/// The slice of the Slack Web API that slackmark needs
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Validate the token and identify its workspace
    async fn auth_test(&self) -> Result<AuthInfo>;

    /// One page of `conversations.list` for the given type
    async fn channels_page(&self, kind: ChannelType, cursor: Option<&str>) -> Result<Page<Channel>>;

    /// One page of `users.list`
    async fn users_page(&self, cursor: Option<&str>) -> Result<Page<User>>;
}

/// Every channel of one type, following `next_cursor` to the end
pub async fn list_channels(api: &dyn SlackApi, kind: ChannelType) -> Result<Vec<Channel>> {
    let mut channels = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.channels_page(kind, cursor.as_deref()).await?;
        channels.extend(page.items);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!("Fetched {} {} channels", channels.len(), kind);
    Ok(channels)
}

/// Every human member, sorted by display name (real name as fallback)
pub async fn list_users(api: &dyn SlackApi) -> Result<Vec<User>> {
    let mut users = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.users_page(cursor.as_deref()).await?;
        users.extend(page.items.into_iter().filter(User::is_regular));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    users.sort_by_cached_key(User::sort_key);
    info!("Fetched {} regular users", users.len());
    Ok(users)
}

//! Netscape bookmark file writer
//!
//! Chrome and Edge import this format through "Import bookmarks → HTML file".
//! Links use the `slack://` scheme so the desktop app opens them directly.

use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::info;

use crate::{Channel, CoreError, Result, User};

pub const CHANNEL_FOLDER: &str = "Slack";
pub const USER_FOLDER: &str = "Slack Users";

pub struct BookmarkWriter {
    workspace_id: String,
    timestamp: i64,
}

impl BookmarkWriter {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    /// Pin ADD_DATE/LAST_MODIFIED, mostly for reproducible output in tests
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn channel_url(&self, channel_id: &str) -> String {
        format!("slack://channel?team={}&id={}", self.workspace_id, channel_id)
    }

    pub fn user_url(&self, user_id: &str) -> String {
        format!("slack://user?team={}&id={}", self.workspace_id, user_id)
    }

    /// Render channel bookmarks, sorted case-insensitively by name
    pub fn render_channels(&self, channels: &[Channel]) -> String {
        let mut sorted: Vec<&Channel> = channels.iter().collect();
        sorted.sort_by_key(|c| c.name.to_lowercase());

        let entries = sorted
            .into_iter()
            .map(|c| (self.channel_url(&c.id), c.label()));
        self.render(CHANNEL_FOLDER, entries)
    }

    /// Render DM bookmarks in the order given
    pub fn render_users(&self, users: &[User]) -> String {
        let entries = users.iter().map(|u| (self.user_url(&u.id), u.label()));
        self.render(USER_FOLDER, entries)
    }

    pub fn write_channels(&self, channels: &[Channel], path: &Path) -> Result<PathBuf> {
        let html = self.render_channels(channels);
        write_file(path, &html)?;
        info!("Wrote {} channel bookmarks to {}", channels.len(), path.display());
        Ok(path.to_path_buf())
    }

    pub fn write_users(&self, users: &[User], path: &Path) -> Result<PathBuf> {
        let html = self.render_users(users);
        write_file(path, &html)?;
        info!("Wrote {} user DM bookmarks to {}", users.len(), path.display());
        Ok(path.to_path_buf())
    }

    fn render(&self, folder: &str, entries: impl Iterator<Item = (String, String)>) -> String {
        let ts = self.timestamp;
        let mut html = format!(
            "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
             <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
             <TITLE>Bookmarks</TITLE>\n\
             <H1>Bookmarks</H1>\n\
             <DL><p>\n    \
             <DT><H3 ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\">{folder}</H3>\n    \
             <DL><p>\n"
        );

        for (url, label) in entries {
            html.push_str(&format!(
                "            <DT><A HREF=\"{}\" ADD_DATE=\"{}\">{}</A>\n",
                url,
                ts,
                escape_html(&label)
            ));
        }

        html.push_str("    </DL><p>\n</DL><p>\n");
        html
    }
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Escape text placed between tags
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

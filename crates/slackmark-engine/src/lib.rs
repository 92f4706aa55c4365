//! Export orchestration: Slack → bookmark files → import guides

use anyhow::Result;
use slackmark_anonymizer::FileProcessor;
use slackmark_core::{BookmarkWriter, Channel, ChannelType, GuideKind, GuideWriter, Language, User};
use slackmark_slack::{list_channels, list_users, SlackApi, SlackError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const ALL_CHANNELS_FILE: &str = "slack_all_channels.html";
pub const PUBLIC_CHANNELS_FILE: &str = "slack_public_channels.html";
pub const USER_DMS_FILE: &str = "slack_user_dms.html";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub public_only: bool,
    /// Exact channel names to keep
    pub channel_filter: Option<Vec<String>>,
    pub include_dm: bool,
    pub anonymize: bool,
    pub open_browser: bool,
    pub output_dir: PathBuf,
    pub mapping_file: PathBuf,
    pub language: Language,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            public_only: false,
            channel_filter: None,
            include_dm: true,
            anonymize: false,
            open_browser: false,
            output_dir: PathBuf::from("."),
            mapping_file: PathBuf::from("anonymizer_mappings.json"),
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub generated: Vec<PathBuf>,
    pub anonymized: Vec<PathBuf>,
    pub success: bool,
}

pub struct Exporter {
    api: Arc<dyn SlackApi>,
    workspace_id: String,
}

impl Exporter {
    pub fn new(api: Arc<dyn SlackApi>, workspace_id: impl Into<String>) -> Self {
        Self {
            api,
            workspace_id: workspace_id.into(),
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Check the token; prefer the API's team ID over a mismatched configured one
    pub async fn verify_workspace(&mut self) -> Result<()> {
        let auth = self.api.auth_test().await.map_err(log_slack_error)?;

        if !auth.team_id.is_empty() && auth.team_id != self.workspace_id {
            warn!(
                "WORKSPACE_ID ({}) does not match the token's team ({}); using {}. Update .env to silence this",
                self.workspace_id, auth.team_id, auth.team_id
            );
            self.workspace_id = auth.team_id;
        }
        Ok(())
    }

    pub async fn run(&self, options: &ExportOptions) -> Result<ExportReport> {
        let mut report = ExportReport {
            success: true,
            ..Default::default()
        };
        let bookmarks = BookmarkWriter::new(&self.workspace_id);
        let guides = GuideWriter::new(options.language);

        info!(
            "Exporting (public_only={}, include_dm={}, filter={:?})",
            options.public_only, options.include_dm, options.channel_filter
        );

        let (channels, channel_file, guide_kind) = if options.public_only {
            (
                self.fetch_channels(&[ChannelType::Public]).await,
                PUBLIC_CHANNELS_FILE,
                GuideKind::PublicChannels,
            )
        } else {
            (
                self.fetch_channels(&[ChannelType::Public, ChannelType::Private]).await,
                ALL_CHANNELS_FILE,
                GuideKind::AllChannels,
            )
        };
        let channels = apply_filter(channels, options.channel_filter.as_deref());

        if channels.is_empty() {
            warn!("No channels to export");
        } else {
            let written = write_channel_bookmarks(&bookmarks, &guides, &channels, &options.output_dir, channel_file, guide_kind);
            match written {
                Ok((bookmark, guide)) => {
                    report.generated.push(bookmark);
                    if options.open_browser {
                        open_in_browser(&guide);
                    }
                    report.generated.push(guide);
                }
                Err(e) => {
                    error!("Failed to write channel bookmarks: {:#}", e);
                    report.success = false;
                }
            }
        }

        if options.include_dm {
            let users = self.fetch_users().await;
            if users.is_empty() {
                warn!("No users to export");
            } else {
                match write_user_bookmarks(&bookmarks, &guides, &users, &options.output_dir) {
                    Ok((bookmark, guide)) => {
                        report.generated.push(bookmark);
                        report.generated.push(guide);
                    }
                    Err(e) => {
                        error!("Failed to write user DM bookmarks: {:#}", e);
                        report.success = false;
                    }
                }
            }
        }

        if report.generated.is_empty() {
            warn!("No files were generated");
            report.success = false;
            return Ok(report);
        }

        for path in &report.generated {
            info!("Generated {}", path.display());
        }

        if options.anonymize {
            info!("Anonymizing generated files");
            let mut processor = FileProcessor::open(&options.mapping_file);
            match processor.process_files(&report.generated) {
                Ok(done) => report.anonymized = done,
                // The export itself still counts as done
                Err(e) => error!("Anonymization failed: {}", e),
            }
        }

        Ok(report)
    }

    /// Channels of the given types; a type that cannot be listed contributes none
    async fn fetch_channels(&self, kinds: &[ChannelType]) -> Vec<Channel> {
        let mut channels = Vec::new();
        for &kind in kinds {
            match list_channels(self.api.as_ref(), kind).await {
                Ok(found) => channels.extend(found),
                Err(e) => {
                    log_slack_error(e);
                    warn!("Skipping {} channels (needs the {} scope)", kind, kind.required_scope());
                }
            }
        }
        channels
    }

    async fn fetch_users(&self) -> Vec<User> {
        list_users(self.api.as_ref()).await.unwrap_or_else(|e| {
            log_slack_error(e);
            Vec::new()
        })
    }
}

fn log_slack_error(e: SlackError) -> SlackError {
    error!("Slack API error: {}", e);
    if let Some(hint) = e.hint() {
        error!("{}", hint);
    }
    e
}

pub fn apply_filter(channels: Vec<Channel>, filter: Option<&[String]>) -> Vec<Channel> {
    let Some(names) = filter.filter(|names| !names.is_empty()) else {
        return channels;
    };

    info!("Keeping only channels: {}", names.join(", "));
    let kept: Vec<Channel> = channels
        .into_iter()
        .filter(|c| names.iter().any(|n| n == &c.name))
        .collect();
    if kept.is_empty() {
        warn!("No channel matched the filter");
    }
    kept
}

/// Split `general, random,,dev` into trimmed, non-empty names
pub fn parse_channel_filter(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_channel_bookmarks(
    bookmarks: &BookmarkWriter,
    guides: &GuideWriter,
    channels: &[Channel],
    dir: &Path,
    file_name: &str,
    kind: GuideKind,
) -> Result<(PathBuf, PathBuf)> {
    let bookmark = bookmarks.write_channels(channels, &dir.join(file_name))?;
    let guide = guides.write(kind, &display_path(&bookmark), &dir.join(kind.file_name()))?;
    Ok((bookmark, guide))
}

fn write_user_bookmarks(
    bookmarks: &BookmarkWriter,
    guides: &GuideWriter,
    users: &[User],
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let bookmark = bookmarks.write_users(users, &dir.join(USER_DMS_FILE))?;
    let kind = GuideKind::UserDms;
    let guide = guides.write(kind, &display_path(&bookmark), &dir.join(kind.file_name()))?;
    Ok((bookmark, guide))
}

/// Absolute path for the guide, so the user can find the file from anywhere
fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn open_in_browser(path: &Path) {
    match open::that(display_path(path)) {
        Ok(()) => info!("Opened {} in the browser", path.display()),
        Err(e) => error!("Could not open {}: {}", path.display(), e),
    }
}

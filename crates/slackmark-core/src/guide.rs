//! Import guide pages
//!
//! One page per bookmark file, walking the user through Chrome's
//! "Import bookmarks" dialog.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::bookmark::{escape_html, write_file, CHANNEL_FOLDER, USER_FOLDER};
use crate::{Language, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    AllChannels,
    PublicChannels,
    UserDms,
}

impl GuideKind {
    /// Default file name, matched by the anonymizer's `*_guide.html` glob
    pub fn file_name(&self) -> &'static str {
        match self {
            GuideKind::AllChannels => "all_channel_guide.html",
            GuideKind::PublicChannels => "public_channel_guide.html",
            GuideKind::UserDms => "user_dm_guide.html",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::Mac,
            _ => Platform::Other,
        }
    }

    /// Chrome's bookmark manager shortcut
    pub fn bookmark_shortcut(&self) -> &'static str {
        match self {
            Platform::Windows => "Ctrl+Shift+O",
            Platform::Mac | Platform::Other => "Cmd+Option+B",
        }
    }
}

struct GuideText {
    title: &'static str,
    open_manager: &'static str,
    steps: [&'static str; 3],
    select_file: &'static str,
    note_label: &'static str,
    note: String,
    retry: &'static str,
    button: &'static str,
}

fn guide_text(language: Language, kind: GuideKind) -> GuideText {
    match language {
        Language::Ja => GuideText {
            title: match kind {
                GuideKind::AllChannels => "Slackチャンネル ブックマークインポート手順",
                GuideKind::PublicChannels => "Slackパブリックチャンネル ブックマークインポート手順",
                GuideKind::UserDms => "Slackユーザー DMブックマークインポート手順",
            },
            open_manager: "Chromeでブックマークマネージャーを開く",
            steps: [
                "右上の「...」をクリックし、「ブックマークをインポート」を選択",
                "「HTMLファイルから」を選択し、ファイルを選択する",
                "以下のファイルを選択:",
            ],
            select_file: "「開く」をクリックしてインポート",
            note_label: "注意:",
            note: match kind {
                GuideKind::UserDms => format!(
                    "インポート後、「{}」フォルダにユーザーDMのブックマークが追加されます。",
                    USER_FOLDER
                ),
                _ => format!(
                    "インポート後、「{}」フォルダに全チャンネルが追加されます。",
                    CHANNEL_FOLDER
                ),
            },
            retry: "インポートに問題がある場合は、一度Chromeを再起動してから再度インポートを試みてください。",
            button: "ブックマークマネージャーを開く",
        },
        Language::En => GuideText {
            title: match kind {
                GuideKind::AllChannels => "Importing Slack Channel Bookmarks",
                GuideKind::PublicChannels => "Importing Slack Public Channel Bookmarks",
                GuideKind::UserDms => "Importing Slack User DM Bookmarks",
            },
            open_manager: "Open the Chrome bookmark manager",
            steps: [
                "Click \"...\" in the top right and choose \"Import bookmarks\"",
                "Choose \"From HTML file\" and pick a file",
                "Select this file:",
            ],
            select_file: "Click \"Open\" to import",
            note_label: "Note:",
            note: match kind {
                GuideKind::UserDms => format!(
                    "After importing, user DM bookmarks appear in the \"{}\" folder.",
                    USER_FOLDER
                ),
                _ => format!(
                    "After importing, all channels appear in the \"{}\" folder.",
                    CHANNEL_FOLDER
                ),
            },
            retry: "If the import fails, restart Chrome and try again.",
            button: "Open bookmark manager",
        },
    }
}

pub struct GuideWriter {
    language: Language,
    platform: Platform,
}

impl GuideWriter {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            platform: Platform::current(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn render(&self, kind: GuideKind, bookmark_path: &Path) -> String {
        let text = guide_text(self.language, kind);
        let shortcut = self.platform.bookmark_shortcut();
        let file_path = escape_html(&bookmark_path.display().to_string());

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <title>{title}</title>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; padding: 20px; }}
        h1 {{ color: #1264A3; }}
        .steps {{ background: #f5f5f5; padding: 15px; border-radius: 5px; }}
        .step {{ margin: 10px 0; }}
        .file-path {{ background: #eee; padding: 5px; font-family: monospace; word-break: break-all; border-radius: 3px; }}
        .note {{ background: #fffde7; padding: 10px; margin-top: 20px; border-radius: 5px; }}
        button {{ background: #1264A3; color: white; border: none; padding: 8px 16px;
                 margin-top: 20px; border-radius: 4px; cursor: pointer; }}
        button:hover {{ background: #0b4f85; }}
    </style>
</head>
<body>
    <h1>{title}</h1>

    <div class="steps">
        <div class="step">1. {open_manager}: <strong>{shortcut}</strong></div>
        <div class="step">2. {step2}</div>
        <div class="step">3. {step3}</div>
        <div class="step">4. {step4}</div>
        <div class="file-path">{file_path}</div>
        <div class="step">5. {select_file}</div>
    </div>

    <div class="note">
        <p><strong>{note_label}</strong> {note}</p>
        <p>{retry}</p>
    </div>

    <button onclick="window.open('chrome://bookmarks/')">{button}</button>
</body>
</html>
"#,
            lang = self.language.code(),
            title = text.title,
            open_manager = text.open_manager,
            shortcut = shortcut,
            step2 = text.steps[0],
            step3 = text.steps[1],
            step4 = text.steps[2],
            file_path = file_path,
            select_file = text.select_file,
            note_label = text.note_label,
            note = text.note,
            retry = text.retry,
            button = text.button,
        )
    }

    pub fn write(&self, kind: GuideKind, bookmark_path: &Path, output: &Path) -> Result<PathBuf> {
        let html = self.render(kind, bookmark_path);
        write_file(output, &html)?;
        info!("Wrote import guide to {}", output.display());
        Ok(output.to_path_buf())
    }
}

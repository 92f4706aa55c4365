use clap::{Args, Parser, Subcommand};
use slackmark_core::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slackmark")]
#[command(about = "Export Slack channels and DMs as browser bookmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate bookmark files and import guides
    Export(ExportArgs),

    /// Replace workspace details in generated files with dummy values
    Anonymize(AnonymizeArgs),

    /// Show the Slack settings in effect and test the token
    CheckEnv,

    /// Look for tokens, IDs and generated files that should not be shared
    Audit {
        /// Directory to scan
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Print the findings as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Public channels only
    #[arg(long)]
    pub public_only: bool,

    /// Skip user DM bookmarks
    #[arg(long)]
    pub no_dm: bool,

    /// Comma-separated channel names to keep (e.g. general,random)
    #[arg(long)]
    pub channels: Option<String>,

    /// Anonymize the generated files
    #[arg(long)]
    pub anonymize: bool,

    /// Do not open the import guide in the browser
    #[arg(long)]
    pub no_open: bool,

    /// Where to write the files (default from config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Guide language: ja or en (default: config, then locale)
    #[arg(long)]
    pub lang: Option<Language>,
}

#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Single file to anonymize
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output path for --file (default: overwrite the input)
    #[arg(short, long, requires = "file")]
    pub output: Option<PathBuf>,

    /// Directory searched for generated files when --file is absent
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Mapping sidecar (default from config)
    #[arg(long)]
    pub mapping_file: Option<PathBuf>,
}

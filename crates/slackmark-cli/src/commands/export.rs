use anyhow::{bail, Result};
use slackmark_config::{Config, Credentials};
use slackmark_engine::{parse_channel_filter, ExportOptions, Exporter};
use std::sync::Arc;
use tracing::info;

use crate::cli::ExportArgs;

pub async fn handle(args: ExportArgs) -> Result<()> {
    let config = Config::load()?;
    let credentials = Credentials::from_env();
    let client = super::slack_client(&credentials, &config)?;

    info!("Workspace: {} ({})", credentials.workspace_name, credentials.workspace_id);

    let mut exporter = Exporter::new(Arc::new(client), &credentials.workspace_id);
    exporter.verify_workspace().await?;

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    std::fs::create_dir_all(&output_dir)?;

    let options = ExportOptions {
        public_only: args.public_only,
        channel_filter: args.channels.as_deref().map(parse_channel_filter),
        include_dm: !args.no_dm,
        anonymize: args.anonymize,
        open_browser: config.open_browser && !args.no_open,
        output_dir,
        mapping_file: config.mapping_file.clone(),
        language: args.lang.unwrap_or_else(|| config.language()),
    };

    let report = exporter.run(&options).await?;
    if !report.success {
        bail!("Export failed: no bookmark files were generated");
    }

    println!("✓ Generated {} files:", report.generated.len());
    for path in &report.generated {
        println!("  {}", path.display());
    }
    if options.anonymize {
        println!("✓ Anonymized {} files", report.anonymized.len());
        println!("  Mappings: {}", options.mapping_file.display());
    }

    Ok(())
}

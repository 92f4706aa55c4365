use anyhow::Result;
use slackmark_config::{Config, Credentials, DEFAULT_WORKSPACE_ID, DEFAULT_WORKSPACE_NAME};
use slackmark_slack::SlackApi;
use tracing::error;

pub async fn handle() -> Result<()> {
    let config = Config::load()?;
    let credentials = Credentials::from_env();

    println!("Environment:");
    match credentials.token_preview() {
        Some(preview) => println!("  SLACK_TOKEN: {}", preview),
        None => println!("  SLACK_TOKEN: (not set)"),
    }
    println!(
        "  WORKSPACE_NAME: {}{}",
        credentials.workspace_name,
        default_marker(&credentials.workspace_name, DEFAULT_WORKSPACE_NAME)
    );
    println!(
        "  WORKSPACE_ID: {}{}",
        credentials.workspace_id,
        default_marker(&credentials.workspace_id, DEFAULT_WORKSPACE_ID)
    );

    println!("\nConfig ({}):", Config::config_path().display());
    println!("  Output dir: {}", config.output_dir.display());
    println!("  Mapping file: {}", config.mapping_file.display());
    println!("  API: {}", config.slack.api_base_url);

    let client = super::slack_client(&credentials, &config)?;
    println!("\nauth.test:");
    match client.auth_test().await {
        Ok(auth) => {
            println!("  ✓ user: {}", auth.user);
            println!("  ✓ team: {} ({})", auth.team, auth.team_id);
            if auth.team_id != credentials.workspace_id {
                println!("  ! WORKSPACE_ID differs from the token's team; set WORKSPACE_ID={}", auth.team_id);
            }
            Ok(())
        }
        Err(e) => {
            if let Some(hint) = e.hint() {
                error!("{}", hint);
            }
            Err(e.into())
        }
    }
}

fn default_marker(value: &str, default: &str) -> &'static str {
    if value == default { " (default)" } else { "" }
}

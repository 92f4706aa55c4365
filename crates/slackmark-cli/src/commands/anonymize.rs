use anyhow::Result;
use slackmark_anonymizer::FileProcessor;
use slackmark_config::Config;

use crate::cli::AnonymizeArgs;

pub fn handle(args: AnonymizeArgs) -> Result<()> {
    let mapping_file = args
        .mapping_file
        .unwrap_or_else(|| Config::load_or_default().mapping_file);
    let mut processor = FileProcessor::open(&mapping_file);

    let processed = processor.process(args.file.as_deref(), args.output.as_deref(), &args.directory)?;

    if processed.is_empty() {
        println!("No files to anonymize in {}", args.directory.display());
        return Ok(());
    }

    println!("✓ Anonymized {} files:", processed.len());
    for path in &processed {
        println!("  {}", path.display());
    }

    let table = processor.mapper().table();
    println!("\nMappings ({}):", mapping_file.display());
    println!("  Workspace IDs: {}", table.workspace_id_map.len());
    println!("  User IDs: {}", table.user_id_map.len());
    println!("  Channel IDs: {}", table.channel_id_map.len());
    println!("  Names: {}", table.name_map.len());
    println!("  Companies: {}", table.company_map.len());

    Ok(())
}

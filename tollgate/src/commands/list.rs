// tollgate/src/commands/list.rs
//
// USE CASE: Inventory of the checkpoint store of a data context.

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use tollgate_core::application::summarize_checkpoints;
use tollgate_core::infrastructure::FilesystemCheckpointStore;
use tollgate_core::infrastructure::config::load_context_config;

pub fn execute(context_dir: PathBuf) -> anyhow::Result<()> {
    let context = load_context_config(&context_dir).with_context(|| {
        format!("Failed to load data context from {:?}", context_dir)
    })?;
    let store = FilesystemCheckpointStore::from_context(&context)?;

    println!("📚 Checkpoints in {}", store.base_dir().display());

    let summaries = summarize_checkpoints(&store)?;
    if summaries.is_empty() {
        println!("   (none)");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Class", "Validations", "Actions", "Status"]);

    for summary in &summaries {
        let status = match &summary.load_error {
            _ if summary.is_healthy() => "✅ ok".to_string(),
            Some(e) => format!("❌ {}", e),
            None => format!("⚠️  {} lint error(s)", summary.lint_errors),
        };
        table.add_row(vec![
            summary.name.clone(),
            summary.class_name.clone().unwrap_or_else(|| "-".to_string()),
            summary.validations.to_string(),
            summary.actions.to_string(),
            status,
        ]);
    }

    println!("{table}");

    let unhealthy = summaries.iter().filter(|s| !s.is_healthy()).count();
    if unhealthy > 0 {
        println!("⚠️  {} checkpoint(s) need attention", unhealthy);
    }
    Ok(())
}

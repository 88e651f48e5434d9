// tollgate/src/commands/plan.rs
//
// USE CASE: Dry-run a stored checkpoint: which batches, which suites, which actions.

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

use tollgate_core::application::plan_stored_checkpoint;
use tollgate_core::infrastructure::FilesystemCheckpointStore;
use tollgate_core::infrastructure::config::load_context_config;

pub fn execute(name: String, context_dir: PathBuf, run_time: Option<String>) -> anyhow::Result<()> {
    let run_time = match run_time {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("Invalid --run-time '{}' (expected RFC 3339)", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let context = load_context_config(&context_dir).with_context(|| {
        format!("Failed to load data context from {:?}", context_dir)
    })?;
    let store = FilesystemCheckpointStore::from_context(&context)?;

    let plan = plan_stored_checkpoint(&store, &name, run_time)
        .with_context(|| format!("Failed to plan checkpoint '{}'", name))?;

    tracing::info!(run_name = %plan.run_name, "Plan ready");
    println!("{}", plan.to_json()?);
    Ok(())
}

// tollgate/src/commands/show.rs
//
// USE CASE: Print the document as the loader sees it (defaults filled, order kept).

use anyhow::Context;
use std::path::PathBuf;

use tollgate_core::infrastructure::config::{load_checkpoint, to_json, to_yaml};

use crate::cli::OutputFormat;

pub fn execute(file: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_checkpoint(&file)
        .with_context(|| format!("Failed to load checkpoint from {:?}", file))?;

    let rendered = match format {
        OutputFormat::Yaml => to_yaml(&config)?,
        OutputFormat::Json => to_json(&config)?,
    };

    println!("{}", rendered.trim_end());
    Ok(())
}

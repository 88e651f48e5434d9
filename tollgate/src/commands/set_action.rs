// tollgate/src/commands/set_action.rs
//
// USE CASE: Upsert one action of a checkpoint file.

use anyhow::anyhow;
use std::path::PathBuf;

use tollgate_core::application::{ActionUpdate, apply_action_update, parse_param};

pub fn execute(
    file: PathBuf,
    name: String,
    class_name: String,
    module_name: Option<String>,
    params: Vec<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let params = params
        .iter()
        .map(|raw| parse_param(raw).map_err(|e| anyhow!(e)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let target = output.unwrap_or_else(|| file.clone());
    let update = ActionUpdate {
        name: name.clone(),
        class_name,
        module_name,
        params,
    };

    let updated = apply_action_update(&file, &target, update)?;

    println!(
        "✨ Action '{}' written to {} ({} action(s))",
        name,
        target.display(),
        updated.action_list.len()
    );
    Ok(())
}

// tollgate/src/commands/check.rs
//
// USE CASE: Parse + validate + lint a checkpoint file. Exit code 1 on errors (CI gate).

use std::path::PathBuf;

use tollgate_core::domain::checkpoint::CheckpointLinter;
use tollgate_core::infrastructure::config::load_checkpoint;

pub fn execute(file: PathBuf) -> anyhow::Result<()> {
    println!("🔎 Checking {}", file.display());

    // Schema errors (missing name/class_name, wrong shapes) stop here with a diagnostic
    let config = match load_checkpoint(&file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    println!(
        "   Checkpoint: {} ({} validation(s), {} action(s))",
        config.name,
        config.validations.len(),
        config.action_list.len()
    );

    let report = CheckpointLinter::lint(&config);
    println!("{}", report);

    if report.has_errors() {
        eprintln!("\n❌ FAILURE. Checkpoint '{}' is not runnable.", config.name);
        std::process::exit(1);
    }

    println!("✅ Checkpoint '{}' looks runnable.", config.name);
    Ok(())
}

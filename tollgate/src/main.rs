// tollgate/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // RUST_LOG is not read: default INFO level, on stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => commands::check::execute(file),
        Commands::Show { file, format } => commands::show::execute(file, format),
        Commands::List { context_dir } => commands::list::execute(context_dir),
        Commands::Plan {
            name,
            context_dir,
            run_time,
        } => commands::plan::execute(name, context_dir, run_time),
        Commands::SetAction {
            file,
            name,
            class_name,
            module_name,
            params,
            output,
        } => commands::set_action::execute(file, name, class_name, module_name, params, output),
    }
}

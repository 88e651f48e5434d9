// tollgate-core/src/infrastructure/config/mod.rs

pub mod context;
pub mod loader;
pub mod variables;

pub use context::{ContextConfig, DataContext, load_context_config};
pub use loader::{
    load_checkpoint, load_checkpoint_with, parse_checkpoint, save_checkpoint, to_json, to_yaml,
};
pub use variables::ConfigVariables;

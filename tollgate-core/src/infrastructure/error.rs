// tollgate-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(tollgate::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(tollgate::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid checkpoint document '{path}': {message}")]
    #[diagnostic(
        code(tollgate::infra::schema),
        help("Sequences ('action_list', 'validations') and mappings must keep their expected shape.")
    )]
    Schema { path: String, message: String },

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(tollgate::infra::json))]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Data context configuration not found at '{0}'")]
    #[diagnostic(code(tollgate::infra::config_missing))]
    ConfigNotFound(String),

    // --- STORE ---
    #[error("Checkpoint '{0}' not found in the checkpoint store")]
    #[diagnostic(
        code(tollgate::infra::checkpoint_missing),
        help("Run 'tollgate list' to see the available checkpoints.")
    )]
    CheckpointNotFound(String),

    #[error("Unsafe path traversal detected: {0}")]
    #[diagnostic(code(tollgate::infra::unsafe_path))]
    UnsafePath(String),
}

// tollgate-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid checkpoint configuration: {0}")]
    #[diagnostic(
        code(tollgate::domain::invalid_config),
        help("'name' and 'class_name' are required, and every action needs a name and a class_name.")
    )]
    InvalidConfig(String),

    #[error("Validation #{index} has no expectation suite")]
    #[diagnostic(
        code(tollgate::domain::missing_suite),
        help("Set 'expectation_suite_name' on the validation or at the checkpoint level.")
    )]
    MissingExpectationSuite { index: usize },

    #[error("Invalid run name template '{template}'")]
    #[diagnostic(
        code(tollgate::domain::run_name_template),
        help("Only strftime specifiers are allowed (e.g. %Y%m%d-%H%M%S).")
    )]
    InvalidRunNameTemplate { template: String },

    #[error("Action '{name}' ({class_name}) has invalid parameters: {message}")]
    #[diagnostic(code(tollgate::domain::action))]
    InvalidAction {
        name: String,
        class_name: String,
        message: String,
    },
}

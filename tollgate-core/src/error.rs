// tollgate-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum TollgateError {
    // --- DOMAIN ERRORS (checkpoint rules, planning) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, stores) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl From<std::io::Error> for TollgateError {
    fn from(err: std::io::Error) -> Self {
        TollgateError::Infrastructure(InfrastructureError::Io(err))
    }
}

// tollgate-core/src/domain/mod.rs

pub mod checkpoint;
pub mod error;

pub use error::DomainError;

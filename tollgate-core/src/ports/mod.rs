// tollgate-core/src/ports/mod.rs

pub mod repository;

pub use repository::CheckpointRepository;

// tollgate-core/src/application/mod.rs

pub mod edit;
pub mod inventory;
pub mod plan;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI can do `use tollgate_core::application::{plan_checkpoint, summarize_checkpoints};`
// without knowing the internal file layout.

pub use edit::{ActionUpdate, apply_action_update, parse_param};
pub use inventory::{CheckpointSummary, summarize_checkpoints};
pub use plan::{RunPlan, plan_checkpoint, plan_stored_checkpoint};

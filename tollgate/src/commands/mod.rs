// tollgate/src/commands/mod.rs

pub mod check;
pub mod list;
pub mod plan;
pub mod set_action;
pub mod show;

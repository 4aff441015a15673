//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` drives a run; the renderer and updater are the two
//! per-unit workers it delegates to.

pub mod renderer;
pub mod scaffold_service;
pub mod updater;

pub use renderer::UnitRenderer;
pub use scaffold_service::{RunContext, RunSummary, ScaffoldService};
pub use updater::MarkerUpdater;

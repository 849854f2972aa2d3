//! Main coordination logic

pub mod assembler;
pub mod orchestrator;
pub mod selector;

pub use assembler::assemble_submission;
pub use orchestrator::AggregationOrchestrator;
pub use selector::{best_run_index, select_best_run};

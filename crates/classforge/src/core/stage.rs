//! Core pipeline stage trait
//!
//! The model is built by four stages that run strictly in sequence. Each
//! stage sees the complete node sequence and the registry as left by the
//! previous stage, and mutates the registry in place.

use super::{Database, DiagramNode};

/// One step of the diagram-to-model pipeline
///
/// Stages are infallible: malformed input degrades to some deterministic
/// model state instead of an error.
pub trait Stage<D: Database>: Send + Sync {
    /// Run the stage over the whole node sequence
    fn run(&self, nodes: &[DiagramNode], database: &mut D);

    /// Get the name of this stage
    fn name(&self) -> &'static str;
}

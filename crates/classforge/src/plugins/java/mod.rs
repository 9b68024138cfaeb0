//! Java target plugin
//!
//! Renders the finalized class model as Java sources plus a markdown report.

mod emitter;
mod report;

pub use emitter::{EmitterConfig, GeneratedArtifact, JavaEmitter};
pub use report::{ArtifactReport, GenerationReport};

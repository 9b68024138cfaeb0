//! Plugin implementations
//!
//! The draw.io loader feeds the class model stages, whose output the Java
//! emitter renders. The orchestrator wires them together.

pub mod class;
pub mod drawio;
pub mod java;
pub mod orchestrator;

pub use class::*;
pub use drawio::*;
pub use java::*;
pub use orchestrator::*;

//! Core abstractions for diagram conversion
//!
//! This module defines the traits every loader, pipeline stage and emitter
//! implements, plus the shared input types and label helpers.

pub mod chumsky_utils;
mod database;
mod emitter;
mod error;
mod loader;
pub mod logging;
mod markup;
mod node;
mod stage;
mod style;
mod text;

pub use database::*;
pub use emitter::*;
pub use error::*;
pub use loader::*;
pub use logging::*;
pub use markup::*;
pub use node::*;
pub use stage::*;
pub use style::*;
pub use text::*;

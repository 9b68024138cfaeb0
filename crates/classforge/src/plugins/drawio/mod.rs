//! draw.io diagram plugin
//!
//! Reads `.drawio` / mxGraph XML into the flat node sequence used by the
//! class model stages.

mod loader;

pub use loader::DrawioLoader;

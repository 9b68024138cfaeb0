//! Core emitter trait for generated output
//!
//! An emitter renders one finalized entity at a time. It receives the whole
//! database so name references (superclass, interfaces) can be looked up.

use anyhow::Result;

use super::Database;

/// Core trait for source emitters
pub trait Emitter<D: Database>: Send + Sync {
    /// The output type of this emitter
    type Output;

    /// Render a single entry of the database
    fn emit(&self, entry: &D::Entry, database: &D) -> Result<Self::Output>;

    /// Render every entry in database order
    fn emit_all(&self, database: &D) -> Result<Vec<Self::Output>> {
        database
            .entries()
            .map(|entry| self.emit(entry, database))
            .collect()
    }

    /// Get the name of this emitter
    fn name(&self) -> &'static str;

    /// Get the target language
    fn language(&self) -> &'static str;

    /// File extension of generated files, without the dot
    fn extension(&self) -> &'static str;
}

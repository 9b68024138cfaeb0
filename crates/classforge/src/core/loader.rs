//! Core loader trait for diagram sources
//!
//! A loader is the mechanical step that turns a serialized diagram into the
//! flat node sequence the pipeline consumes. It performs no inference.

use anyhow::Result;

use super::DiagramNode;

/// Core trait for diagram loaders
///
/// # Example
/// ```
/// use classforge::core::Loader;
/// use classforge::plugins::drawio::DrawioLoader;
///
/// let loader = DrawioLoader::new();
/// let nodes = loader
///     .load(r#"<mxGraphModel><root><mxCell id="0"/></root></mxGraphModel>"#)
///     .unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
pub trait Loader: Send + Sync {
    /// Read every cell of the diagram, in document order
    fn load(&self, input: &str) -> Result<Vec<DiagramNode>>;

    /// Get the name of this loader
    fn name(&self) -> &'static str;

    /// Check if the input looks like this loader's format
    fn can_load(&self, input: &str) -> bool;
}

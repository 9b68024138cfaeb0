//! Classforge - Turn draw.io class diagrams into Java sources
//!
//! A library that reads loosely drawn UML class diagrams (free-form labels,
//! typos, wrong arrow styles) and recovers a clean class model from them,
//! then renders that model as Java.
//!
//! # Quick Start
//!
//! ```rust
//! use classforge::generate_java;
//!
//! let diagram = r#"<mxGraphModel><root>
//!   <mxCell id="0"/><mxCell id="1" parent="0"/>
//!   <mxCell id="2" value="Dog" style="swimlane;" vertex="1" parent="1"/>
//!   <mxCell id="3" value="-name: String" style="text;" vertex="1" parent="2"/>
//! </root></mxGraphModel>"#;
//!
//! let artifacts = generate_java(diagram, None).unwrap();
//! assert_eq!(artifacts[0].file_name, "Dog.java");
//! assert!(artifacts[0].content.contains("private String name;"));
//! ```
//!
//! # Advanced Usage
//!
//! The stages can be run one by one over a hand-built node sequence:
//!
//! ```rust
//! use classforge::prelude::*;
//!
//! let nodes = vec![
//!     DiagramNode::vertex("2", "1", "<<Interface>> Drawable", "swimlane;"),
//!     DiagramNode::vertex("3", "2", "+draw(): void", "text;"),
//! ];
//!
//! let mut database = ClassDatabase::new();
//! NodeClassifier::new().run(&nodes, &mut database);
//! MemberParser::new().run(&nodes, &mut database);
//!
//! let drawable = database.get_class("2").unwrap();
//! assert_eq!(drawable.kind, ConstructKind::Interface);
//! assert!(drawable.methods[0].is_abstract);
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;

use crate::plugins::class::ClassDatabase;
use crate::plugins::java::{EmitterConfig, GeneratedArtifact};
use crate::plugins::orchestrator::Orchestrator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CellStyle, ConvertError, Database, DiagramNode, Emitter, Loader, MarkupLabel, Stage,
    };
    pub use crate::plugins::class::{
        ClassDatabase, ClassEntity, ConstructKind, FieldDescriptor, HierarchyResolver,
        MemberParser, MethodDescriptor, NodeClassifier, RelationshipResolver, Visibility,
    };
    pub use crate::plugins::drawio::DrawioLoader;
    pub use crate::plugins::java::{EmitterConfig, GeneratedArtifact, GenerationReport, JavaEmitter};
    pub use crate::plugins::orchestrator::Orchestrator;
}

/// Build the class model of an already loaded node sequence
///
/// Never fails: ambiguous or malformed labels degrade to a best-effort model.
///
/// # Example
/// ```rust
/// use classforge::{analyze, DiagramNode};
///
/// let nodes = vec![DiagramNode::vertex("2", "1", "<i>Shape</i>", "swimlane;")];
/// let model = analyze(&nodes);
/// assert_eq!(model.class_count(), 1);
/// ```
pub fn analyze(nodes: &[DiagramNode]) -> ClassDatabase {
    Orchestrator::new().analyze(nodes)
}

/// Load draw.io XML and build its class model
///
/// # Errors
/// Fails on malformed XML and on documents that are not uncompressed
/// draw.io diagrams.
pub fn analyze_drawio(input: &str) -> anyhow::Result<ClassDatabase> {
    Orchestrator::new().analyze_source(input)
}

/// Convert draw.io XML into Java sources, one artifact per class
///
/// # Example
/// ```rust
/// use classforge::generate_java;
///
/// let diagram = r#"<mxGraphModel><root>
///   <mxCell id="2" value="Point" style="swimlane;" vertex="1" parent="1"/>
/// </root></mxGraphModel>"#;
///
/// let artifacts = generate_java(diagram, Some("geo")).unwrap();
/// assert_eq!(artifacts[0].file_name, "geo/Point.java");
/// assert!(artifacts[0].content.starts_with("package geo;"));
/// ```
pub fn generate_java(input: &str, package: Option<&str>) -> anyhow::Result<Vec<GeneratedArtifact>> {
    let config = match package {
        Some(package) => EmitterConfig::new().with_package(package),
        None => EmitterConfig::new(),
    };
    Orchestrator::with_emitter_config(config).process(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::ConstructKind;

    #[test]
    fn test_analyze_empty_input() {
        assert_eq!(analyze(&[]).class_count(), 0);
    }

    #[test]
    fn test_analyze_drawio() {
        let model = analyze_drawio(
            r#"<mxGraphModel><root><mxCell id="2" value="&lt;&lt;enum&gt;&gt; Color" style="swimlane;" vertex="1" parent="1"/></root></mxGraphModel>"#,
        )
        .unwrap();
        let color = model.get_class("2").unwrap();
        assert_eq!(color.name, "Color");
        assert_eq!(color.kind, ConstructKind::Enum);
    }

    #[test]
    fn test_generate_java_rejects_other_formats() {
        assert!(generate_java("graph LR; A-->B", None).is_err());
    }
}

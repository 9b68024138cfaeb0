//! Pipeline orchestrator
//!
//! Coordinates the flow of data through all plugins:
//! Loader → Classifier → Member parser → Relationships → Hierarchy → Emitter

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{ConvertError, DiagramNode, Emitter, Loader, Stage};
use crate::plugins::class::{
    ClassDatabase, HierarchyResolver, MemberParser, NodeClassifier, RelationshipResolver,
};
use crate::plugins::drawio::DrawioLoader;
use crate::plugins::java::{EmitterConfig, GeneratedArtifact, JavaEmitter};

/// Plugin orchestrator that runs the complete pipeline
///
/// The four model stages always run in the same fixed order and keep no
/// state between runs, so analyzing the same nodes twice gives equal models.
pub struct Orchestrator {
    loader: DrawioLoader,
    stages: Vec<Box<dyn Stage<ClassDatabase>>>,
    emitter: JavaEmitter,
}

impl Orchestrator {
    /// Create an orchestrator with the default Java emitter
    pub fn new() -> Self {
        Self::with_emitter_config(EmitterConfig::default())
    }

    /// Create an orchestrator with a configured Java emitter
    pub fn with_emitter_config(config: EmitterConfig) -> Self {
        Self {
            loader: DrawioLoader::new(),
            stages: vec![
                Box::new(NodeClassifier::new()),
                Box::new(MemberParser::new()),
                Box::new(RelationshipResolver::new()),
                Box::new(HierarchyResolver::new()),
            ],
            emitter: JavaEmitter::with_config(config),
        }
    }

    /// Names of the model stages, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn emitter(&self) -> &JavaEmitter {
        &self.emitter
    }

    /// Build the class model from an already loaded node sequence
    pub fn analyze(&self, nodes: &[DiagramNode]) -> ClassDatabase {
        let analyze_span = span!(Level::INFO, "analyze", node_count = nodes.len());
        let _enter = analyze_span.enter();

        let mut database = ClassDatabase::new();
        for stage in &self.stages {
            debug!(stage = stage.name(), "Running stage");
            stage.run(nodes, &mut database);
        }

        info!(class_count = database.class_count(), "Class model completed");
        database
    }

    /// Load a draw.io document and build its class model
    pub fn analyze_source(&self, input: &str) -> Result<ClassDatabase> {
        let source_span = span!(Level::INFO, "analyze_source", input_len = input.len());
        let _enter = source_span.enter();

        if !self.loader.can_load(input) {
            warn!(loader = self.loader.name(), "Input is not a draw.io document");
            return Err(ConvertError::unsupported_format("input is not a draw.io document").into());
        }

        let nodes = self.loader.load(input)?;
        Ok(self.analyze(&nodes))
    }

    /// Render every named class, in registry order
    ///
    /// Classes whose label yielded no usable name are skipped with a warning.
    pub fn generate(&self, database: &ClassDatabase) -> Result<Vec<GeneratedArtifact>> {
        let generate_span = span!(
            Level::INFO,
            "generate",
            language = self.emitter.language(),
            class_count = database.class_count()
        );
        let _enter = generate_span.enter();

        let mut artifacts = Vec::with_capacity(database.class_count());
        for class in database.classes() {
            if class.name.is_empty() {
                warn!(id = %class.id, label = %class.raw_label, "Skipping class without a usable name");
                continue;
            }
            artifacts.push(self.emitter.emit(class, database)?);
        }

        info!(artifact_count = artifacts.len(), "Generation completed");
        Ok(artifacts)
    }

    /// Load, analyze and generate in one go
    pub fn process(&self, input: &str) -> Result<Vec<GeneratedArtifact>> {
        let database = self.analyze_source(input)?;
        self.generate(&database)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

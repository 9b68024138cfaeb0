//! Hierarchy resolution
//!
//! After relations are known, every class receives override stubs for the
//! contract it inherits: the abstract methods of an abstract superclass and
//! the non-default methods of each realized interface. Records take part in
//! the interface pass only. A stub is added only if the class has no method
//! of that name yet.

use std::collections::HashMap;

use tracing::{debug, info, span, Level};

use super::database::{ClassDatabase, ConstructKind, MethodDescriptor, Visibility};
use crate::core::{DiagramNode, Stage};

/// Stage 4: override stubs from superclasses and interfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyResolver;

impl HierarchyResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the whole registry: all superclass stubs, then all interface stubs
    pub fn resolve(&self, database: &mut ClassDatabase) -> usize {
        let index = database.name_index();
        let ids = database.ids();

        let mut synthesized = 0;
        for id in &ids {
            synthesized += self.inherit_abstract_methods(id, &index, database);
        }
        for id in &ids {
            synthesized += self.realize_interfaces(id, &index, database);
        }
        synthesized
    }

    fn inherit_abstract_methods(
        &self,
        id: &str,
        index: &HashMap<String, String>,
        database: &mut ClassDatabase,
    ) -> usize {
        let Some(child) = database.get_class(id) else {
            return 0;
        };
        if !child.kind.is_class_like() {
            return 0;
        }
        let Some(parent) = child
            .superclass
            .as_ref()
            .and_then(|name| index.get(name))
            .and_then(|parent_id| database.get_class(parent_id))
        else {
            return 0;
        };
        if parent.kind != ConstructKind::AbstractClass {
            return 0;
        }

        let parent_name = parent.name.clone();
        let inherited: Vec<MethodDescriptor> = parent
            .methods
            .iter()
            .filter(|m| m.is_abstract)
            .map(MethodDescriptor::to_override)
            .collect();

        self.add_stubs(id, &parent_name, inherited, database)
    }

    fn realize_interfaces(
        &self,
        id: &str,
        index: &HashMap<String, String>,
        database: &mut ClassDatabase,
    ) -> usize {
        let Some(child) = database.get_class(id) else {
            return 0;
        };
        if matches!(child.kind, ConstructKind::Interface | ConstructKind::Enum) {
            return 0;
        }

        let mut contracts = Vec::new();
        for interface_name in &child.interfaces {
            let Some(interface) = index
                .get(interface_name)
                .and_then(|interface_id| database.get_class(interface_id))
                .filter(|c| c.kind == ConstructKind::Interface)
            else {
                continue;
            };

            let required: Vec<MethodDescriptor> = interface
                .methods
                .iter()
                .filter(|m| m.visibility != Visibility::Default)
                .map(|m| MethodDescriptor {
                    visibility: Visibility::Public,
                    ..m.to_override()
                })
                .collect();
            contracts.push((interface.name.clone(), required));
        }

        contracts
            .into_iter()
            .map(|(interface_name, required)| self.add_stubs(id, &interface_name, required, database))
            .sum()
    }

    fn add_stubs(
        &self,
        id: &str,
        origin: &str,
        stubs: Vec<MethodDescriptor>,
        database: &mut ClassDatabase,
    ) -> usize {
        let Some(child) = database.get_class_mut(id) else {
            return 0;
        };

        let mut added = 0;
        for stub in stubs {
            if child.has_method(&stub.name) {
                debug!(class = %child.name, method = %stub.name, "Method already declared, no stub needed");
                continue;
            }
            info!(class = %child.name, method = %stub.name, from = %origin, "Synthesized override");
            child.add_method(stub);
            added += 1;
        }
        added
    }
}

impl Stage<ClassDatabase> for HierarchyResolver {
    fn run(&self, nodes: &[DiagramNode], database: &mut ClassDatabase) {
        let hierarchy_span = span!(Level::INFO, "resolve_hierarchy", class_count = database.class_count());
        let _enter = hierarchy_span.enter();

        debug!(node_count = nodes.len(), "Resolving inherited contracts");
        let synthesized = self.resolve(database);

        info!(synthesized, "Hierarchy resolution completed");
    }

    fn name(&self) -> &'static str {
        "hierarchy_resolver"
    }
}

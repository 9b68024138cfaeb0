//! Relationship resolution
//!
//! Edges between class containers become `extends` / `implements`
//! relations. Authors often draw the wrong arrow, so the drawn relation is
//! checked against the kind of the target and corrected where Java allows
//! only one reading.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, span, warn, Level};

use super::database::{ClassDatabase, ConstructKind};
use crate::core::{CellStyle, DiagramNode, Stage};

/// Inheritance relation between two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Extends,
    Implements,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Extends => write!(f, "extends"),
            Relation::Implements => write!(f, "implements"),
        }
    }
}

impl Relation {
    /// Relation an edge style depicts: dashed is realization, any other
    /// arrowhead is inheritance
    pub fn drawn(style: &CellStyle) -> Option<Self> {
        if style.is_dashed() {
            Some(Relation::Implements)
        } else if style.has_arrowhead() {
            Some(Relation::Extends)
        } else {
            None
        }
    }

    /// Relation actually recorded for a drawn relation towards `target`
    ///
    /// `None` means the edge is dropped.
    pub fn resolve(self, target: ConstructKind) -> Option<Self> {
        use ConstructKind::*;

        match (self, target) {
            (Relation::Extends, Interface) => Some(Relation::Implements),
            (Relation::Extends, Enum | Record) => None,
            (Relation::Extends, Class | AbstractClass) => Some(Relation::Extends),
            (Relation::Implements, Interface) => Some(Relation::Implements),
            (Relation::Implements, Class | AbstractClass) => Some(Relation::Extends),
            // Nothing sensible to correct to, keep as drawn
            (Relation::Implements, Enum | Record) => Some(Relation::Implements),
        }
    }
}

/// Stage 3: inheritance from edges
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipResolver;

impl RelationshipResolver {
    pub fn new() -> Self {
        Self
    }

    fn apply(&self, edge: &DiagramNode, drawn: Relation, database: &mut ClassDatabase) {
        let (Some(source), Some(target)) = (
            database.get_class(&edge.source),
            database.get_class(&edge.target),
        ) else {
            debug!(id = %edge.id, "Edge endpoint is not a class, ignoring");
            return;
        };

        let source_name = source.name.clone();
        let source_kind = source.kind;
        let target_name = target.name.clone();
        let target_kind = target.kind;

        let Some(resolved) = drawn.resolve(target_kind) else {
            info!(
                source = %source_name,
                target = %target_name,
                drawn = %drawn,
                target_kind = %target_kind,
                "Dropped relation that cannot hold in Java"
            );
            return;
        };

        if resolved != drawn {
            info!(
                source = %source_name,
                target = %target_name,
                drawn = %drawn,
                resolved = %resolved,
                "Auto-corrected relation"
            );
        } else if !target_kind.is_class_like() && target_kind != ConstructKind::Interface {
            warn!(
                source = %source_name,
                target = %target_name,
                target_kind = %target_kind,
                "Recorded invalid realization of a non-interface"
            );
        }

        let Some(source) = database.get_class_mut(&edge.source) else {
            return;
        };
        match resolved {
            Relation::Extends if source_kind.is_class_like() => {
                if let Some(previous) = source.superclass.replace(target_name.clone()) {
                    debug!(class = %source_name, previous = %previous, superclass = %target_name, "Superclass replaced");
                }
                debug!(class = %source_name, superclass = %target_name, "Recorded extends");
            }
            Relation::Extends => {
                warn!(
                    source = %source_name,
                    source_kind = %source_kind,
                    target = %target_name,
                    "Only classes can extend a class, dropping relation"
                );
            }
            Relation::Implements => {
                source.interfaces.push(target_name.clone());
                debug!(class = %source_name, interface = %target_name, "Recorded implements");
            }
        }
    }
}

impl Stage<ClassDatabase> for RelationshipResolver {
    fn run(&self, nodes: &[DiagramNode], database: &mut ClassDatabase) {
        let resolve_span = span!(Level::INFO, "resolve_relationships", node_count = nodes.len());
        let _enter = resolve_span.enter();

        let mut edge_count = 0usize;
        for edge in nodes.iter().filter(|n| n.is_connected_edge()) {
            let Some(drawn) = Relation::drawn(&edge.cell_style()) else {
                continue;
            };
            self.apply(edge, drawn, database);
            edge_count += 1;
        }

        info!(edge_count, "Relationship resolution completed");
    }

    fn name(&self) -> &'static str {
        "relationship_resolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::ClassEntity;

    const EXTENDS: &str = "endArrow=block;endSize=16;endFill=0;html=1;";
    const IMPLEMENTS: &str = "endArrow=block;dashed=1;endFill=0;endSize=12;html=1;";

    fn database() -> ClassDatabase {
        let mut db = ClassDatabase::new();
        db.add_class(ClassEntity::new("a", "Circle", ConstructKind::Class));
        db.add_class(ClassEntity::new("s", "Shape", ConstructKind::AbstractClass));
        db.add_class(ClassEntity::new("d", "Drawable", ConstructKind::Interface));
        db.add_class(ClassEntity::new("c", "Color", ConstructKind::Enum));
        db.add_class(ClassEntity::new("p", "Point", ConstructKind::Record));
        db
    }

    fn resolve(edges: Vec<DiagramNode>) -> ClassDatabase {
        let mut db = database();
        RelationshipResolver::new().run(&edges, &mut db);
        db
    }

    #[test]
    fn test_drawn_relation() {
        assert_eq!(Relation::drawn(&CellStyle::parse(EXTENDS)), Some(Relation::Extends));
        assert_eq!(Relation::drawn(&CellStyle::parse(IMPLEMENTS)), Some(Relation::Implements));
        assert_eq!(Relation::drawn(&CellStyle::parse("dashed=1;endArrow=none;")), Some(Relation::Implements));
        assert_eq!(Relation::drawn(&CellStyle::parse("endArrow=none;html=1;")), None);
        assert_eq!(Relation::drawn(&CellStyle::parse("")), None);
    }

    #[test]
    fn test_correction_table() {
        use ConstructKind::*;

        assert_eq!(Relation::Extends.resolve(Interface), Some(Relation::Implements));
        assert_eq!(Relation::Extends.resolve(Enum), None);
        assert_eq!(Relation::Extends.resolve(Class), Some(Relation::Extends));
        assert_eq!(Relation::Extends.resolve(AbstractClass), Some(Relation::Extends));
        assert_eq!(Relation::Implements.resolve(Interface), Some(Relation::Implements));
        assert_eq!(Relation::Implements.resolve(Class), Some(Relation::Extends));
        assert_eq!(Relation::Implements.resolve(AbstractClass), Some(Relation::Extends));
        assert_eq!(Relation::Implements.resolve(Enum), Some(Relation::Implements));
    }

    #[test]
    fn test_extends_class() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "s", EXTENDS)]);
        assert_eq!(db.get_class("a").unwrap().superclass.as_deref(), Some("Shape"));
    }

    #[test]
    fn test_dashed_to_interface_implements() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "d", IMPLEMENTS)]);
        let circle = db.get_class("a").unwrap();
        assert_eq!(circle.interfaces, vec!["Drawable"]);
        assert!(circle.superclass.is_none());
    }

    #[test]
    fn test_extends_interface_becomes_implements() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "d", EXTENDS)]);
        let circle = db.get_class("a").unwrap();
        assert_eq!(circle.interfaces, vec!["Drawable"]);
        assert!(circle.superclass.is_none());
    }

    #[test]
    fn test_extends_enum_is_dropped() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "c", EXTENDS)]);
        let circle = db.get_class("a").unwrap();
        assert!(circle.superclass.is_none());
        assert!(circle.interfaces.is_empty());
    }

    #[test]
    fn test_implements_class_becomes_extends() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "s", IMPLEMENTS)]);
        let circle = db.get_class("a").unwrap();
        assert_eq!(circle.superclass.as_deref(), Some("Shape"));
        assert!(circle.interfaces.is_empty());
    }

    #[test]
    fn test_implements_enum_is_kept() {
        let db = resolve(vec![DiagramNode::edge("e", "a", "c", IMPLEMENTS)]);
        assert_eq!(db.get_class("a").unwrap().interfaces, vec!["Color"]);
    }

    #[test]
    fn test_last_superclass_wins_and_interfaces_accumulate() {
        let db = resolve(vec![
            DiagramNode::edge("e1", "p", "d", IMPLEMENTS),
            DiagramNode::edge("e2", "a", "s", EXTENDS),
            DiagramNode::edge("e3", "a", "d", IMPLEMENTS),
            DiagramNode::edge("e4", "a", "d", EXTENDS),
        ]);
        let circle = db.get_class("a").unwrap();
        assert_eq!(circle.superclass.as_deref(), Some("Shape"));
        assert_eq!(circle.interfaces, vec!["Drawable", "Drawable"]);
        assert_eq!(db.get_class("p").unwrap().interfaces, vec!["Drawable"]);
    }

    #[test]
    fn test_non_class_source_never_extends() {
        let db = resolve(vec![DiagramNode::edge("e", "d", "s", EXTENDS)]);
        let drawable = db.get_class("d").unwrap();
        assert!(drawable.superclass.is_none());
        assert!(drawable.interfaces.is_empty());
    }

    #[test]
    fn test_unknown_endpoints_and_plain_lines_are_ignored() {
        let db = resolve(vec![
            DiagramNode::edge("e1", "a", "missing", EXTENDS),
            DiagramNode::edge("e2", "a", "s", "endArrow=none;"),
            DiagramNode::edge("e3", "a", "", EXTENDS),
        ]);
        assert_eq!(db, database());
    }
}

//! Class model plugin
//!
//! Builds the class model from diagram nodes in four stages: classification,
//! member parsing, relationship resolution and hierarchy resolution.

mod classifier;
mod database;
mod hierarchy;
mod member_parser;
mod relationships;

pub use classifier::NodeClassifier;
pub use database::{
    ClassDatabase, ClassEntity, ConstructKind, FieldDescriptor, MethodDescriptor, Visibility,
    DEFAULT_FIELD_TYPE, DEFAULT_RETURN_TYPE,
};
pub use hierarchy::HierarchyResolver;
pub use member_parser::{Member, MemberParser};
pub use relationships::{Relation, RelationshipResolver};

//! Class model database
//!
//! Stores the class entities recovered from a diagram, keyed by the id of
//! the container node they came from. Relationships are kept on the
//! entities as plain class-name references and resolved through
//! [`ClassDatabase::name_index`] when needed.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::core::Database;

/// Field type used when the label does not declare one
pub const DEFAULT_FIELD_TYPE: &str = "String";

/// Return type used when the label does not declare one
pub const DEFAULT_RETURN_TYPE: &str = "void";

/// Kind of type construct a class container represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Enum,
    Record,
}

impl ConstructKind {
    /// Class or abstract class: the only kinds that extend and get stubs
    pub fn is_class_like(self) -> bool {
        matches!(self, ConstructKind::Class | ConstructKind::AbstractClass)
    }

    /// Declaration keyword in Java
    pub fn keyword(self) -> &'static str {
        match self {
            ConstructKind::Class => "class",
            ConstructKind::AbstractClass => "abstract class",
            ConstructKind::Interface => "interface",
            ConstructKind::Enum => "enum",
            ConstructKind::Record => "record",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructKind::Class => write!(f, "class"),
            ConstructKind::AbstractClass => write!(f, "abstract"),
            ConstructKind::Interface => write!(f, "interface"),
            ConstructKind::Enum => write!(f, "enum"),
            ConstructKind::Record => write!(f, "record"),
        }
    }
}

/// Access modifier of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,    // +
    Protected, // #
    Private,   // -
    /// Interface default method: has a body, overriding is optional
    Default,
}

impl Visibility {
    pub fn from_sigil(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Default => "default",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field (attribute) of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Cleaned label text the field was parsed from
    pub original: String,
    pub name: String,
    pub field_type: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub initializer: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original: name.clone(),
            name,
            field_type: DEFAULT_FIELD_TYPE.to_string(),
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
            initializer: None,
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}

/// A method of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Cleaned label text the method was parsed from
    pub original: String,
    pub name: String,
    /// Raw parameter list between the parentheses
    pub parameters: String,
    pub return_type: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    /// Synthesized to satisfy an inherited contract
    pub is_override: bool,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original: format!("{}()", name),
            name,
            parameters: String::new(),
            return_type: DEFAULT_RETURN_TYPE.to_string(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_override: false,
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = parameters.into();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Concrete public-or-inherited stub overriding this method
    pub fn to_override(&self) -> Self {
        Self {
            is_abstract: false,
            is_override: true,
            ..self.clone()
        }
    }
}

/// A class construct recovered from one container node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntity {
    /// Id of the container node
    pub id: String,
    /// Sanitized, identifier-safe name
    pub name: String,
    /// Cleaned container label, kept for diagnostics
    pub raw_label: String,
    pub kind: ConstructKind,
    /// Name of the extended class
    pub superclass: Option<String>,
    /// Names of realized interfaces, in drawing order
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl ClassEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ConstructKind) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            raw_label: name.clone(),
            name,
            kind,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_raw_label(mut self, raw_label: impl Into<String>) -> Self {
        self.raw_label = raw_label.into();
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: MethodDescriptor) {
        self.methods.push(method);
    }

    /// Returns true if a method with this name is declared (any signature)
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    /// Methods generated by hierarchy resolution
    pub fn overrides(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.is_override)
    }
}

/// Class registry keyed by container node id, in diagram order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassDatabase {
    classes: IndexMap<String, ClassEntity>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// Register an entity under its own id
    ///
    /// A second entity with the same id replaces the first in place.
    pub fn add_class(&mut self, class: ClassEntity) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.classes.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn get_class(&self, id: &str) -> Option<&ClassEntity> {
        self.classes.get(id)
    }

    pub fn get_class_mut(&mut self, id: &str) -> Option<&mut ClassEntity> {
        self.classes.get_mut(id)
    }

    /// Node ids in registration order
    pub fn ids(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Entity a class-name reference resolves to
    ///
    /// With duplicate names the last registered entity wins, matching
    /// [`ClassDatabase::name_index`].
    pub fn find_by_name(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.values().rev().find(|c| c.name == name)
    }

    /// Flat lookup table from class name to node id
    ///
    /// Rebuilt on demand. When two containers share a name, the one
    /// registered last wins and the clash is logged.
    pub fn name_index(&self) -> HashMap<String, String> {
        let mut index = HashMap::with_capacity(self.classes.len());
        for class in self.classes.values() {
            if let Some(previous) = index.insert(class.name.clone(), class.id.clone()) {
                warn!(
                    name = %class.name,
                    previous_id = %previous,
                    id = %class.id,
                    "Duplicate class name, name lookups bind to the later definition"
                );
            }
        }
        index
    }
}

impl Database for ClassDatabase {
    type Entry = ClassEntity;

    fn insert(&mut self, id: &str, entry: Self::Entry) -> Result<()> {
        self.classes.insert(id.to_string(), entry);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<&Self::Entry> {
        self.get_class(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Self::Entry> {
        self.get_class_mut(id)
    }

    fn entries(&self) -> impl Iterator<Item = &Self::Entry> {
        self.classes.values()
    }

    fn clear(&mut self) {
        self.classes.clear();
    }

    fn len(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_class() {
        let class = ClassEntity::new("2", "Animal", ConstructKind::Class);
        assert_eq!(class.name, "Animal");
        assert_eq!(class.raw_label, "Animal");
        assert!(class.superclass.is_none());
        assert!(class.interfaces.is_empty());
        assert!(class.fields.is_empty());
        assert!(class.methods.is_empty());
    }

    #[test]
    fn test_add_members() {
        let mut class = ClassEntity::new("2", "Person", ConstructKind::Class);
        class.add_field(
            FieldDescriptor::new("name")
                .with_visibility(Visibility::Public)
                .with_type("String"),
        );
        class.add_method(MethodDescriptor::new("greet").with_return_type("String"));

        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.fields[0].visibility, Visibility::Public);
        assert!(class.has_method("greet"));
        assert!(!class.has_method("wave"));
    }

    #[test]
    fn test_descriptor_defaults() {
        let field = FieldDescriptor::new("label");
        assert_eq!(field.field_type, DEFAULT_FIELD_TYPE);
        assert_eq!(field.visibility, Visibility::Private);

        let method = MethodDescriptor::new("run");
        assert_eq!(method.return_type, DEFAULT_RETURN_TYPE);
        assert_eq!(method.visibility, Visibility::Public);
        assert!(!method.is_override);
    }

    #[test]
    fn test_to_override() {
        let method = MethodDescriptor::new("area")
            .with_return_type("double")
            .with_visibility(Visibility::Protected)
            .with_abstract(true);
        let stub = method.to_override();
        assert!(!stub.is_abstract);
        assert!(stub.is_override);
        assert_eq!(stub.visibility, Visibility::Protected);
        assert_eq!(stub.return_type, "double");
    }

    #[test]
    fn test_visibility_sigils() {
        assert_eq!(Visibility::from_sigil('+'), Some(Visibility::Public));
        assert_eq!(Visibility::from_sigil('-'), Some(Visibility::Private));
        assert_eq!(Visibility::from_sigil('#'), Some(Visibility::Protected));
        assert_eq!(Visibility::from_sigil('~'), None);
        assert_eq!(Visibility::Default.to_string(), "default");
    }

    #[test]
    fn test_construct_kind() {
        assert!(ConstructKind::Class.is_class_like());
        assert!(ConstructKind::AbstractClass.is_class_like());
        assert!(!ConstructKind::Interface.is_class_like());
        assert_eq!(ConstructKind::AbstractClass.keyword(), "abstract class");
        assert_eq!(ConstructKind::default(), ConstructKind::Class);
    }

    #[test]
    fn test_database_keeps_insertion_order() {
        let mut db = ClassDatabase::new();
        db.add_class(ClassEntity::new("9", "Zebra", ConstructKind::Class));
        db.add_class(ClassEntity::new("3", "Ant", ConstructKind::Class));

        let names: Vec<_> = db.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Ant"]);
        assert_eq!(db.ids(), vec!["9", "3"]);
    }

    #[test]
    fn test_duplicate_names_persist_and_last_wins() {
        let mut db = ClassDatabase::new();
        db.add_class(ClassEntity::new("2", "Shape", ConstructKind::Interface));
        db.add_class(ClassEntity::new("7", "Shape", ConstructKind::Class));

        assert_eq!(db.class_count(), 2);
        assert_eq!(db.name_index().get("Shape"), Some(&"7".to_string()));
        assert_eq!(db.find_by_name("Shape").unwrap().id, "7");
    }

    #[test]
    fn test_database_trait() {
        let mut db = ClassDatabase::new();
        assert!(db.is_empty());
        Database::insert(&mut db, "2", ClassEntity::new("2", "Dog", ConstructKind::Class)).unwrap();

        assert_eq!(db.len(), 1);
        assert!(db.contains("2"));
        assert_eq!(db.entries().count(), 1);

        db.get_mut("2").unwrap().interfaces.push("Pet".to_string());
        assert_eq!(db.get("2").unwrap().interfaces, vec!["Pet"]);

        db.clear();
        assert!(db.is_empty());
    }
}

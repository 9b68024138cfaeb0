//! Java source emitter
//!
//! Renders one `.java` file per class entity. Bodies are stubs: constructors
//! assign their parameters, `getX`/`setX` read and write the matching field,
//! everything else gets a placeholder and a type-appropriate return value.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use super::report::ArtifactReport;
use crate::core::{lowercase_first, sanitize_identifier, uppercase_first, words, ConvertError, Emitter};
use crate::plugins::class::{
    ClassDatabase, ClassEntity, ConstructKind, FieldDescriptor, MethodDescriptor, Visibility,
    DEFAULT_RETURN_TYPE,
};

const INDENT: &str = "    ";

/// Marker text in a member label asking for generated accessors
const ACCESSORS_PLACEHOLDER: &str = "getters/setters";

const UTIL_TYPES: &[&str] = &[
    "List", "ArrayList", "LinkedList", "Map", "HashMap", "LinkedHashMap", "TreeMap", "Set",
    "HashSet", "LinkedHashSet", "TreeSet", "Collection", "Optional", "Queue", "Deque",
    "ArrayDeque", "Date", "UUID",
];

const TIME_TYPES: &[&str] = &[
    "LocalDate", "LocalTime", "LocalDateTime", "Instant", "Duration", "Period", "ZonedDateTime",
];

/// Emitter settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Target package; also the directory of generated files
    pub package: Option<String>,
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        let package = package.into();
        self.package = (!package.trim().is_empty()).then(|| package.trim().to_string());
        self
    }
}

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub class_name: String,
    /// Path relative to the output directory
    pub file_name: String,
    pub content: String,
    pub report: ArtifactReport,
}

/// Line-oriented source buffer
#[derive(Debug, Default)]
struct SourceWriter {
    out: String,
}

impl SourceWriter {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Blank separator line, never two in a row
    fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") && !self.out.ends_with("{\n") {
            self.out.push('\n');
        }
    }

    fn close_block(&mut self) {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.out.push_str("}\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn is_placeholder(original: &str) -> bool {
    original.to_ascii_lowercase().contains(ACCESSORS_PLACEHOLDER)
}

/// Zero value used for uninitialized constants and stub returns
fn default_value(java_type: &str) -> &'static str {
    match java_type {
        "int" | "long" | "short" | "byte" => "0",
        "double" => "0.0",
        "float" => "0.0f",
        "boolean" => "false",
        "char" => "'\\u0000'",
        "String" => "\"\"",
        _ => "null",
    }
}

/// Split a parameter list on commas outside of `<>`, `()` and `[]`
fn split_parameters(raw: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, c) in raw.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth <= 0 => {
                params.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    params.push(&raw[start..]);
    params
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// A parameter in Java syntax, plus its name when one can be found
///
/// `radius: double` becomes `double radius`; anything else is kept verbatim.
fn java_parameter(param: &str) -> (String, Option<String>) {
    match param.split_once(':') {
        Some((name, java_type)) => {
            let name = name.trim();
            (format!("{} {}", java_type.trim(), name), Some(sanitize_identifier(name)))
        }
        None => {
            let name = param
                .split_whitespace()
                .nth(1)
                .map(sanitize_identifier)
                .filter(|n| !n.is_empty());
            (param.to_string(), name)
        }
    }
}

/// Property name of a `getX` / `setX` style method
fn accessor_property(method_name: &str, prefix: &str) -> Option<String> {
    let head = method_name.get(..prefix.len())?;
    let rest = method_name.get(prefix.len()..)?;
    (head.eq_ignore_ascii_case(prefix) && !rest.is_empty()).then(|| lowercase_first(rest))
}

fn required_imports(class: &ClassEntity) -> BTreeSet<&'static str> {
    let mut imports = BTreeSet::new();
    let mut check = |text: &str| {
        for token in words(text) {
            if UTIL_TYPES.contains(&token) {
                imports.insert("java.util.*");
            }
            if TIME_TYPES.contains(&token) {
                imports.insert("java.time.*");
            }
        }
    };

    for field in &class.fields {
        check(&field.field_type);
    }
    for method in &class.methods {
        check(&method.return_type);
        check(&method.parameters);
    }
    imports
}

fn modifiers(visibility: Visibility, is_static: bool, is_final: bool, is_abstract: bool) -> String {
    let mut parts = Vec::new();
    if visibility != Visibility::Default {
        parts.push(visibility.as_str());
    }
    if is_static {
        parts.push("static");
    }
    if is_abstract {
        parts.push("abstract");
    }
    if is_final {
        parts.push("final");
    }
    parts.iter().map(|p| format!("{} ", p)).collect()
}

fn field_declaration(field: &FieldDescriptor) -> String {
    let mut declaration = format!(
        "{}{} {}",
        modifiers(field.visibility, field.is_static, field.is_final, false),
        field.field_type,
        field.name
    );
    match &field.initializer {
        Some(value) => declaration.push_str(&format!(" = {}", value)),
        None if field.is_static && field.is_final => {
            declaration.push_str(&format!(" = {}", default_value(&field.field_type)))
        }
        None => {}
    }
    declaration.push(';');
    declaration
}

/// Java source emitter
#[derive(Debug, Clone, Default)]
pub struct JavaEmitter {
    config: EmitterConfig,
}

impl JavaEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Output path of a class, relative to the output directory
    pub fn file_name(&self, class_name: &str) -> String {
        match &self.config.package {
            Some(package) => format!("{}/{}.java", package.replace('.', "/"), class_name),
            None => format!("{}.java", class_name),
        }
    }

    fn declaration(
        &self,
        class: &ClassEntity,
        database: &ClassDatabase,
        report: &mut ArtifactReport,
    ) -> String {
        let mut declaration = match class.kind {
            ConstructKind::Record => {
                let components: Vec<String> = class
                    .fields
                    .iter()
                    .filter(|f| !f.is_static)
                    .map(|f| {
                        report.attributes.push(f.name.clone());
                        format!("{} {}", f.field_type, f.name)
                    })
                    .collect();
                format!("public record {}({})", class.name, components.join(", "))
            }
            kind => format!("public {} {}", kind.keyword(), class.name),
        };

        if let Some(superclass) = class.superclass.as_ref().filter(|_| class.kind.is_class_like()) {
            declaration.push_str(&format!(" extends {}", superclass));
        }

        let mut interfaces: Vec<&str> = Vec::new();
        for name in &class.interfaces {
            if !interfaces.contains(&name.as_str()) {
                interfaces.push(name);
            }
        }
        if !interfaces.is_empty() {
            let clause = if class.kind == ConstructKind::Interface {
                "extends"
            } else {
                "implements"
            };
            declaration.push_str(&format!(" {} {}", clause, interfaces.join(", ")));
        }

        for name in interfaces {
            if let Some(target) = database.find_by_name(name) {
                if target.kind != ConstructKind::Interface {
                    warn!(class = %class.name, target = %name, kind = %target.kind, "Realizes a non-interface");
                    report
                        .issues
                        .push(format!("{} realizes {}, which is a {}, not an interface", class.name, name, target.kind));
                }
            }
        }

        declaration
    }

    fn enum_constants(&self, class: &ClassEntity, w: &mut SourceWriter, report: &mut ArtifactReport) {
        let is_constant = |f: &&FieldDescriptor| {
            !f.original.contains(':') && !f.original.starts_with(['+', '-', '#'])
        };
        let constants: Vec<&str> = class
            .fields
            .iter()
            .filter(is_constant)
            .map(|f| f.name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
        let has_members = class.fields.len() > constants.len() || !class.methods.is_empty();

        if !constants.is_empty() {
            w.line(1, format!("{};", constants.join(", ")));
            report.attributes.extend(constants.iter().map(|c| c.to_string()));
        } else if has_members {
            w.line(1, ";");
        }
        w.blank();

        for field in class.fields.iter().filter(|f| !is_constant(f)) {
            w.line(1, field_declaration(field));
            report.attributes.push(field.name.clone());
        }
    }

    /// Field declarations; returns true if a placeholder asked for accessors
    fn fields(&self, class: &ClassEntity, w: &mut SourceWriter, report: &mut ArtifactReport) -> bool {
        let mut wants_accessors = false;
        for field in &class.fields {
            if is_placeholder(&field.original) {
                wants_accessors = true;
                continue;
            }
            match class.kind {
                ConstructKind::Record if !field.is_static => continue,
                ConstructKind::Interface => {
                    let value = field
                        .initializer
                        .as_deref()
                        .unwrap_or_else(|| default_value(&field.field_type));
                    w.line(1, format!("{} {} = {};", field.field_type, field.name, value));
                }
                _ => w.line(1, field_declaration(field)),
            }
            report.attributes.push(field.name.clone());
        }
        w.blank();
        wants_accessors
    }

    /// Method declarations; returns true if a placeholder asked for accessors
    fn methods(&self, class: &ClassEntity, w: &mut SourceWriter, report: &mut ArtifactReport) -> bool {
        let mut wants_accessors = false;
        for method in &class.methods {
            if is_placeholder(&method.original) {
                wants_accessors = true;
                continue;
            }

            let is_constructor = method.name == class.name;
            self.record_method(method, is_constructor, report);

            let params: Vec<(String, Option<String>)> = split_parameters(&method.parameters)
                .into_iter()
                .map(java_parameter)
                .collect();
            let param_list = params
                .iter()
                .map(|(declaration, _)| declaration.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            if class.kind == ConstructKind::Interface {
                let prefix = if method.visibility == Visibility::Default {
                    "default "
                } else {
                    ""
                };
                w.line(1, format!("{}{} {}({});", prefix, method.return_type, method.name, param_list));
                w.blank();
                continue;
            }

            if method.is_override {
                w.line(1, "@Override");
            }
            let is_abstract = method.is_abstract && !is_constructor;
            let prefix = modifiers(method.visibility, method.is_static, false, is_abstract);
            let signature = if is_constructor {
                format!("{}{}({})", prefix, method.name, param_list)
            } else {
                format!("{}{} {}({})", prefix, method.return_type, method.name, param_list)
            };

            if is_abstract {
                w.line(1, format!("{};", signature));
            } else {
                w.line(1, format!("{} {{", signature));
                let names: Vec<&str> = params.iter().filter_map(|(_, n)| n.as_deref()).collect();
                for line in method_body(method, is_constructor, &names) {
                    w.line(2, line);
                }
                w.line(1, "}");
            }
            w.blank();
        }
        wants_accessors
    }

    fn record_method(&self, method: &MethodDescriptor, is_constructor: bool, report: &mut ArtifactReport) {
        if is_constructor {
            report.constructors += 1;
        } else if method.is_override {
            report.overridden.push(method.name.clone());
        } else if let Some(property) = accessor_property(&method.name, "get") {
            report.getters.push(property);
        } else if let Some(property) = accessor_property(&method.name, "set") {
            report.setters.push(property);
        } else {
            report.custom_methods.push(method.name.clone());
        }
    }

    fn accessors(&self, class: &ClassEntity, w: &mut SourceWriter, report: &mut ArtifactReport) {
        let properties = class
            .fields
            .iter()
            .filter(|f| !f.is_static && !f.name.is_empty() && !is_placeholder(&f.original));

        for field in properties {
            let property = uppercase_first(&field.name);

            let getter = format!("get{}", property);
            if !class.has_method(&getter) {
                w.line(1, format!("public {} {}() {{", field.field_type, getter));
                w.line(2, format!("return {};", field.name));
                w.line(1, "}");
                w.blank();
                report.getters.push(field.name.clone());
            }

            let setter = format!("set{}", property);
            if !class.has_method(&setter) {
                w.line(1, format!("public void {}({} {}) {{", setter, field.field_type, field.name));
                w.line(2, format!("this.{0} = {0};", field.name));
                w.line(1, "}");
                w.blank();
                report.setters.push(field.name.clone());
            }
        }
    }

    fn render(&self, class: &ClassEntity, database: &ClassDatabase) -> GeneratedArtifact {
        let mut report = ArtifactReport::new(class.name.clone());
        let mut w = SourceWriter::default();

        if let Some(package) = &self.config.package {
            w.line(0, format!("package {};", package));
            w.blank();
        }
        let imports = required_imports(class);
        for import in &imports {
            w.line(0, format!("import {};", import));
        }
        w.blank();

        let declaration = self.declaration(class, database, &mut report);
        w.line(0, format!("{} {{", declaration));

        let mut wants_accessors = if class.kind == ConstructKind::Enum {
            self.enum_constants(class, &mut w, &mut report);
            false
        } else {
            self.fields(class, &mut w, &mut report)
        };
        wants_accessors |= self.methods(class, &mut w, &mut report);

        if wants_accessors {
            if class.kind == ConstructKind::Class {
                self.accessors(class, &mut w, &mut report);
            } else {
                debug!(class = %class.name, kind = %class.kind, "Accessor placeholder ignored");
            }
        }
        w.close_block();

        GeneratedArtifact {
            class_name: class.name.clone(),
            file_name: self.file_name(&class.name),
            content: w.finish(),
            report,
        }
    }
}

/// Stub statements for a concrete method
fn method_body(method: &MethodDescriptor, is_constructor: bool, params: &[&str]) -> Vec<String> {
    if is_constructor {
        return params.iter().map(|p| format!("this.{0} = {0};", p)).collect();
    }

    let returns_value = method.return_type != DEFAULT_RETURN_TYPE;
    if returns_value {
        if let Some(property) = accessor_property(&method.name, "get") {
            return vec![format!("return {};", property)];
        }
    }
    if let (Some(property), Some(param)) = (accessor_property(&method.name, "set"), params.first()) {
        return vec![format!("this.{} = {};", property, param)];
    }

    let mut body = vec![format!("// TODO: implement {}", method.name)];
    if returns_value {
        body.push(format!("return {};", default_value(&method.return_type)));
    }
    body
}

impl Emitter<ClassDatabase> for JavaEmitter {
    type Output = GeneratedArtifact;

    fn emit(&self, entry: &ClassEntity, database: &ClassDatabase) -> Result<GeneratedArtifact> {
        if entry.name.is_empty() {
            return Err(ConvertError::emit_error(format!(
                "class at node {} has no usable name (label {:?})",
                entry.id, entry.raw_label
            ))
            .into());
        }

        let artifact = self.render(entry, database);
        debug!(class = %artifact.class_name, file = %artifact.file_name, bytes = artifact.content.len(), "Emitted class");
        Ok(artifact)
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn language(&self) -> &'static str {
        "Java"
    }

    fn extension(&self) -> &'static str {
        "java"
    }
}

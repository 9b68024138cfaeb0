//! Member parsing
//!
//! Every non-empty child line of a class container is read as either a
//! method (the label has both parentheses) or a field. Labels are free-form
//! UML-ish text such as `+area(): double`, `-count: int = 0` or
//! `static final MAX_SIZE`; parsing is heuristic and never fails, the worst
//! case being the whole text taken as the member name.

use tracing::{debug, info, span, trace, Level};

use super::database::{
    ClassDatabase, ConstructKind, FieldDescriptor, MethodDescriptor, Visibility,
    DEFAULT_RETURN_TYPE,
};
use crate::core::{contains_word, is_upper_case, remove_words, sanitize_identifier, DiagramNode, MarkupLabel, Stage};

/// A parsed member line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDescriptor),
    Method(MethodDescriptor),
}

fn strip_sigils(text: &str) -> &str {
    text.trim_start_matches(|c: char| Visibility::from_sigil(c).is_some() || c.is_whitespace())
}

fn looks_like_method(text: &str) -> bool {
    text.contains('(') && text.contains(')')
}

/// Stage 2: fields and methods of every class
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberParser;

impl MemberParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one member line owned by a class of the given kind
    ///
    /// Returns `None` for lines that carry no member: empty labels and
    /// separator rules.
    pub fn parse_member(&self, node: &DiagramNode, owner: ConstructKind) -> Option<Member> {
        let label = MarkupLabel::parse(&node.value);
        if label.text.is_empty() {
            return None;
        }

        let style = node.cell_style();
        if looks_like_method(&label.text) {
            let mut method = self.parse_method(&node.value);
            method.is_abstract |= style.is_italic();
            if owner == ConstructKind::Interface {
                apply_interface_contract(&mut method);
            }
            Some(Member::Method(method))
        } else if style.is_separator() {
            None
        } else {
            Some(Member::Field(self.parse_field(&label.text)))
        }
    }

    /// Parse a field from its cleaned label text
    pub fn parse_field(&self, text: &str) -> FieldDescriptor {
        let text = text.trim();
        let visibility = text
            .chars()
            .next()
            .and_then(Visibility::from_sigil)
            .unwrap_or(Visibility::Private);
        let is_static = contains_word(text, "static");
        let mut is_final = contains_word(text, "final") || is_upper_case(text);

        let working = remove_words(strip_sigils(text), &["static", "final"], false);
        let (declaration, initializer) = match working.split_once('=') {
            Some((declaration, value)) => (declaration.trim(), Some(value.trim())),
            None => (working.trim(), None),
        };

        let (name, field_type) = match declaration.split_once(':') {
            Some((name, field_type)) => (name.trim(), Some(field_type.trim())),
            None => match declaration.split_whitespace().collect::<Vec<_>>().as_slice() {
                [field_type, name, ..] => (*name, Some(*field_type)),
                _ => (declaration, None),
            },
        };

        let name = sanitize_identifier(name);
        // Constant naming convention
        is_final |= name.len() > 1 && is_upper_case(&name);

        let mut field = FieldDescriptor::new(name)
            .with_original(text)
            .with_visibility(visibility)
            .with_static(is_static)
            .with_final(is_final);
        if let Some(field_type) = field_type.filter(|t| !t.is_empty()) {
            field = field.with_type(field_type);
        }
        if let Some(initializer) = initializer {
            field = field.with_initializer(initializer);
        }
        field
    }

    /// Parse a method from its raw label (markup included)
    pub fn parse_method(&self, raw: &str) -> MethodDescriptor {
        let label = MarkupLabel::parse(raw);
        let text = label.text.as_str();

        let is_default = contains_word(text, "default");
        let visibility = if is_default {
            Visibility::Default
        } else {
            text.chars()
                .next()
                .and_then(Visibility::from_sigil)
                .unwrap_or(Visibility::Public)
        };
        let is_static = contains_word(raw, "static") || contains_word(text, "static");
        let is_abstract = label.emphasized || contains_word(text, "abstract");

        let mut keywords = vec!["static", "abstract"];
        if is_default {
            keywords.push("default");
        }
        let working = remove_words(&strip_sigils(text).replace('\\', ""), &keywords, false);
        let working = working.trim();

        let mut name = working;
        let mut parameters = "";
        let mut return_type = None;
        if let Some(close) = working.rfind(')') {
            return_type = working[close + 1..]
                .split_once(':')
                .map(|(_, t)| t.trim())
                .filter(|t| !t.is_empty());

            let head = &working[..=close];
            match head.find('(') {
                Some(open) => {
                    name = &head[..open];
                    parameters = head[open + 1..close].trim();
                }
                None => name = head,
            }
        }

        MethodDescriptor::new(sanitize_identifier(name))
            .with_original(text)
            .with_parameters(parameters)
            .with_return_type(return_type.unwrap_or(DEFAULT_RETURN_TYPE))
            .with_visibility(visibility)
            .with_static(is_static)
            .with_abstract(is_abstract)
    }
}

/// Interface methods are public and abstract, default methods keep their body
fn apply_interface_contract(method: &mut MethodDescriptor) {
    if method.visibility == Visibility::Default {
        method.is_abstract = false;
    } else {
        method.visibility = Visibility::Public;
        method.is_abstract = true;
    }
}

impl Stage<ClassDatabase> for MemberParser {
    fn run(&self, nodes: &[DiagramNode], database: &mut ClassDatabase) {
        let parse_span = span!(Level::INFO, "parse_members", node_count = nodes.len());
        let _enter = parse_span.enter();

        let mut member_count = 0usize;
        for node in nodes.iter().filter(|n| !n.edge) {
            // Nested containers are classes of their own
            if database.get_class(&node.id).is_some() {
                continue;
            }
            let Some(class) = database.get_class_mut(&node.parent) else {
                continue;
            };

            match self.parse_member(node, class.kind) {
                Some(Member::Method(method)) => {
                    if method.name.is_empty() {
                        debug!(id = %node.id, original = %method.original, "Method has no usable name");
                    }
                    debug!(class = %class.name, method = %method.name, visibility = %method.visibility, "Parsed method");
                    class.add_method(method);
                    member_count += 1;
                }
                Some(Member::Field(field)) => {
                    if field.name.is_empty() {
                        debug!(id = %node.id, original = %field.original, "Field has no usable name");
                    }
                    debug!(class = %class.name, field = %field.name, field_type = %field.field_type, "Parsed field");
                    class.add_field(field);
                    member_count += 1;
                }
                None => trace!(id = %node.id, "Skipped member line"),
            }
        }

        info!(member_count, "Member parsing completed");
    }

    fn name(&self) -> &'static str {
        "member_parser"
    }
}

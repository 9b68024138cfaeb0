//! Node classification
//!
//! Turns every class container of the diagram into a [`ClassEntity`] and
//! decides its construct kind from the label: an explicit stereotype tag
//! first, bare keywords second, italic emphasis as the abstract default.

use chumsky::prelude::*;
use tracing::{debug, info, span, trace, Level};

use super::database::{ClassDatabase, ClassEntity, ConstructKind};
use crate::core::chumsky_utils::{optional_whitespace, word};
use crate::core::{remove_words_where, sanitize_identifier, words, DiagramNode, Keyword, MarkupLabel, Stage};

/// Label split into stereotype tags and the text around them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct StereotypeScan<'src> {
    /// Tag words in order of appearance
    tags: Vec<&'src str>,
    /// Label with every tag removed
    remainder: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment<'src> {
    Stereotype(&'src str),
    Char(char),
}

/// `<<word>>` or `«word»`
fn stereotype_parser<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    let open = just("<<").or(just("«"));
    let close = just(">>").or(just("»"));

    open.ignore_then(optional_whitespace())
        .ignore_then(word())
        .then_ignore(optional_whitespace())
        .then_ignore(close)
}

fn segments_parser<'src>() -> impl Parser<'src, &'src str, Vec<Segment<'src>>> {
    stereotype_parser()
        .map(Segment::Stereotype)
        .or(any().map(Segment::Char))
        .repeated()
        .collect()
        .then_ignore(end())
}

fn scan_stereotypes(label: &str) -> StereotypeScan<'_> {
    let segments = match segments_parser().parse(label).into_result() {
        Ok(segments) => segments,
        Err(_) => label.chars().map(Segment::Char).collect(),
    };

    let mut scan = StereotypeScan::default();
    for segment in segments {
        match segment {
            Segment::Stereotype(tag) => scan.tags.push(tag),
            Segment::Char(c) => scan.remainder.push(c),
        }
    }
    scan
}

fn kind_for(keyword: Keyword) -> ConstructKind {
    match keyword {
        Keyword::Interface => ConstructKind::Interface,
        Keyword::Enum => ConstructKind::Enum,
        Keyword::Record => ConstructKind::Record,
        Keyword::Abstract => ConstructKind::AbstractClass,
    }
}

/// Kind named by a stereotype tag; only interface, enum and record count
fn tag_kind(tag: &str) -> Option<ConstructKind> {
    Keyword::from_token(tag)
        .filter(|keyword| *keyword != Keyword::Abstract)
        .map(kind_for)
}

/// Fallback for labels without a tag: keywords written as plain words
fn kind_from_words(text: &str, default: ConstructKind) -> ConstructKind {
    let mut abstract_word = false;
    for token in words(text) {
        match Keyword::from_token(token) {
            Some(Keyword::Abstract) => abstract_word = true,
            Some(keyword) => return kind_for(keyword),
            None => {}
        }
    }

    if abstract_word && default == ConstructKind::Class {
        ConstructKind::AbstractClass
    } else {
        default
    }
}

fn is_kind_word(token: &str) -> bool {
    token.eq_ignore_ascii_case("class") || Keyword::from_token(token).is_some()
}

/// Stage 1: one entity per class container
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeClassifier;

impl NodeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Class container check on a single node
    pub fn is_class_container(node: &DiagramNode) -> bool {
        !node.edge && node.cell_style().is_container()
    }

    /// Build the entity for one container node
    pub fn classify(&self, node: &DiagramNode) -> ClassEntity {
        let label = MarkupLabel::parse(&node.value);
        let emphasized = label.emphasized || node.cell_style().is_italic();
        let default = if emphasized {
            ConstructKind::AbstractClass
        } else {
            ConstructKind::Class
        };

        let scan = scan_stereotypes(&label.text);
        let kind = match scan.tags.first() {
            // An unknown tag (`<<entity>>`) still suppresses the word fallback
            Some(tag) => tag_kind(tag).unwrap_or(default),
            None => kind_from_words(&scan.remainder, default),
        };

        let name = sanitize_identifier(&remove_words_where(&scan.remainder, is_kind_word));
        trace!(id = %node.id, tags = ?scan.tags, emphasized, "Scanned container label");

        ClassEntity::new(node.id.clone(), name, kind).with_raw_label(label.text)
    }
}

impl Stage<ClassDatabase> for NodeClassifier {
    fn run(&self, nodes: &[DiagramNode], database: &mut ClassDatabase) {
        let classify_span = span!(Level::INFO, "classify_nodes", node_count = nodes.len());
        let _enter = classify_span.enter();

        for node in nodes.iter().filter(|n| Self::is_class_container(n)) {
            let class = self.classify(node);
            if class.name.is_empty() {
                debug!(id = %class.id, label = %class.raw_label, "Container has no usable name");
            }
            debug!(id = %class.id, name = %class.name, kind = %class.kind, "Classified container");
            database.add_class(class);
        }

        info!(class_count = database.class_count(), "Node classification completed");
    }

    fn name(&self) -> &'static str {
        "classifier"
    }
}

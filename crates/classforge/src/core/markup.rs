//! Inline label markup
//!
//! Labels drawn with `html=1` carry a small subset of HTML: line breaks,
//! `div`/`p` blocks, and inline formatting spans. The pipeline needs two
//! things from a raw label: the visible text and whether any part of it is
//! emphasized (italic or oblique), which is how abstract members and
//! classes are usually drawn.
//!
//! Only the known formatting tags are removed. Anything else that looks like
//! a tag (`List<String>`, `<<Interface>>`) is kept verbatim, so stereotypes
//! and generic types survive cleaning.

use std::borrow::Cow;

use chumsky::prelude::*;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};

/// Formatting tags stripped from labels
const FORMATTING_TAGS: &[&str] = &[
    "div", "p", "span", "i", "b", "u", "em", "strong", "font", "br", "sup", "sub",
];

/// A tag-shaped fragment of a label: `<name attributes>` or `</name>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupTag<'src> {
    pub closing: bool,
    pub name: &'src str,
    pub attributes: &'src str,
}

impl MarkupTag<'_> {
    fn is_named(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.name.eq_ignore_ascii_case(n))
    }

    /// Known formatting tag that should be removed from the visible text
    pub fn is_formatting(&self) -> bool {
        self.is_named(FORMATTING_TAGS)
    }

    /// Opening tag that starts italic or oblique text
    pub fn is_emphasis(&self) -> bool {
        if self.closing {
            return false;
        }
        if self.is_named(&["i", "em"]) {
            return true;
        }
        let attributes = self.attributes.to_ascii_lowercase();
        attributes.contains("font-style")
            && (attributes.contains("italic") || attributes.contains("oblique"))
    }

    /// Tags that visually break the line
    fn is_break(&self) -> bool {
        self.is_named(&["br"]) || self.is_named(&["div", "p"])
    }

    /// Reproduce the tag text exactly as written
    fn write_verbatim(&self, out: &mut String) {
        out.push('<');
        if self.closing {
            out.push('/');
        }
        out.push_str(self.name);
        out.push_str(self.attributes);
        out.push('>');
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Fragment<'src> {
    Tag(MarkupTag<'src>),
    Char(char),
}

fn tag_parser<'src>() -> impl Parser<'src, &'src str, MarkupTag<'src>> + Clone {
    let name = any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .repeated()
        .at_least(1)
        .to_slice();

    just('<')
        .ignore_then(just('/').or_not())
        .then(name)
        .then(none_of("<>").repeated().to_slice())
        .then_ignore(just('>'))
        .map(|((slash, name), attributes)| MarkupTag {
            closing: slash.is_some(),
            name,
            attributes,
        })
}

fn fragments_parser<'src>() -> impl Parser<'src, &'src str, Vec<Fragment<'src>>> {
    tag_parser()
        .map(Fragment::Tag)
        .or(any().map(Fragment::Char))
        .repeated()
        .collect()
        .then_ignore(end())
}

/// Visible text and emphasis of a raw label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupLabel {
    /// Label with formatting removed, entities decoded and whitespace trimmed
    pub text: String,
    /// Some part of the label is italic/oblique
    pub emphasized: bool,
}

impl MarkupLabel {
    /// Scan a raw label
    pub fn parse(raw: &str) -> Self {
        let fragments = match fragments_parser().parse(raw).into_result() {
            Ok(fragments) => fragments,
            // Unreachable for well-formed UTF-8, but never lose the label
            Err(_) => raw.chars().map(Fragment::Char).collect(),
        };

        let mut text = String::with_capacity(raw.len());
        let mut emphasized = false;

        for fragment in &fragments {
            match fragment {
                Fragment::Char(c) => text.push(*c),
                Fragment::Tag(tag) if tag.is_formatting() => {
                    emphasized |= tag.is_emphasis();
                    if tag.is_break() {
                        text.push(' ');
                    }
                }
                Fragment::Tag(tag) => tag.write_verbatim(&mut text),
            }
        }

        let decoded = decode_entities(&text);
        Self {
            text: decoded.replace('\u{a0}', " ").trim().to_string(),
            emphasized,
        }
    }
}

/// Decode HTML character references left in the label.
///
/// Malformed references (a bare `&` in `A & B`) leave the text untouched.
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    unescape_with(text, |entity| match entity {
        "nbsp" => Some("\u{a0}"),
        other => resolve_predefined_entity(other),
    })
    .unwrap_or(Cow::Borrowed(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_label(raw: &str) -> String {
        MarkupLabel::parse(raw).text
    }

    fn has_emphasis(raw: &str) -> bool {
        MarkupLabel::parse(raw).emphasized
    }

    #[test]
    fn test_plain_label_is_unchanged() {
        assert_eq!(clean_label("Shape"), "Shape");
        assert_eq!(clean_label("  +area(): double  "), "+area(): double");
    }

    #[test]
    fn test_strips_formatting_tags() {
        assert_eq!(clean_label("<b>Shape</b>"), "Shape");
        assert_eq!(
            clean_label("<span style=\"color: rgb(0, 0, 0);\">+name: String</span>"),
            "+name: String"
        );
        assert_eq!(clean_label("<font color=\"#000\">Dog</font>"), "Dog");
    }

    #[test]
    fn test_breaks_become_spaces() {
        assert_eq!(clean_label("&lt;&lt;Interface&gt;&gt;<br>Drawable"), "<<Interface>> Drawable");
        assert_eq!(clean_label("Shape<br/>Base"), "Shape Base");
        assert_eq!(clean_label("<div>Shape</div>"), "Shape");
    }

    #[test]
    fn test_keeps_stereotypes_and_generics() {
        assert_eq!(clean_label("<<Enum>> Color"), "<<Enum>> Color");
        assert_eq!(clean_label("items: List<String>"), "items: List<String>");
        assert_eq!(clean_label("«interface» Saveable"), "«interface» Saveable");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(clean_label("a&nbsp;b"), "a b");
        assert_eq!(clean_label("map: Map&lt;K, V&gt;"), "map: Map<K, V>");
        assert_eq!(clean_label("x&amp;y"), "x&y");
        assert_eq!(clean_label("&#43;id: int"), "+id: int");
    }

    #[test]
    fn test_bare_ampersand_is_kept() {
        assert_eq!(clean_label("Tom & Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_emphasis_detection() {
        assert!(has_emphasis("<i>Shape</i>"));
        assert!(has_emphasis("<EM>area(): double</EM>"));
        assert!(has_emphasis("<span style=\"font-style: italic;\">Shape</span>"));
        assert!(has_emphasis("<div style=\"font-style:oblique\">Shape</div>"));
        assert!(!has_emphasis("<b>Shape</b>"));
        assert!(!has_emphasis("Shape"));
        assert!(!has_emphasis("<span style=\"font-style: normal\">Shape</span>"));
    }

    #[test]
    fn test_emphasis_with_cleaned_text() {
        let label = MarkupLabel::parse("<i>+draw(): void</i>");
        assert!(label.emphasized);
        assert_eq!(label.text, "+draw(): void");
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        assert_eq!(clean_label("a <b"), "a <b");
        assert_eq!(clean_label("x < y > z"), "x < y > z");
    }
}

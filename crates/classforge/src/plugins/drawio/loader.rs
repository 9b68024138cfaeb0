//! draw.io XML loader
//!
//! Streams the document with quick-xml and turns every `mxCell` element into
//! a [`DiagramNode`]. Only the first page of a multi-page file is read.
//! Cells wrapped in `<object>` / `<UserObject>` (cells with custom
//! properties) take their id and label from the wrapper.

use std::path::Path;

use anyhow::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, span, trace, warn, Level};

use crate::core::{ConvertError, DiagramNode, Loader};

/// Label and id carried by a wrapper element around an `mxCell`
#[derive(Debug, Default)]
struct Wrapper {
    id: Option<String>,
    label: Option<String>,
}

/// Attribute values of one element, unescaped
fn read_attributes(
    element: &BytesStart<'_>,
    position: u64,
) -> Result<Vec<(String, String)>, ConvertError> {
    let mut attributes = Vec::new();
    for attr in element.attributes() {
        let attr =
            attr.map_err(|e| ConvertError::xml_error(format!("Attribute error: {e}"), position))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ConvertError::xml_error(format!("Attribute key error: {e}"), position))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ConvertError::xml_error(format!("Attribute value error: {e}"), position))?
            .to_string();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn cell_from_attributes(
    attributes: Vec<(String, String)>,
    wrapper: Option<&Wrapper>,
) -> Result<DiagramNode, ConvertError> {
    let mut node = DiagramNode::default();
    let mut has_id = false;

    for (key, value) in attributes {
        match key.as_str() {
            "id" => {
                node.id = value;
                has_id = true;
            }
            "parent" => node.parent = value,
            "value" => node.value = value,
            "style" => node.style = value,
            "vertex" => node.vertex = value == "1",
            "edge" => node.edge = value == "1",
            "source" => node.source = value,
            "target" => node.target = value,
            _ => {}
        }
    }

    if let Some(wrapper) = wrapper {
        if let Some(id) = &wrapper.id {
            node.id = id.clone();
            has_id = true;
        }
        if let Some(label) = &wrapper.label {
            node.value = label.clone();
        }
    }

    if !has_id {
        return Err(ConvertError::load_error("mxCell element without an id"));
    }
    Ok(node)
}

fn wrapper_from_attributes(attributes: Vec<(String, String)>) -> Wrapper {
    let mut wrapper = Wrapper::default();
    for (key, value) in attributes {
        match key.as_str() {
            "id" => wrapper.id = Some(value),
            "label" => wrapper.label = Some(value),
            _ => {}
        }
    }
    wrapper
}

/// Loader for draw.io / diagrams.net documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawioLoader;

impl DrawioLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and load a diagram file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<DiagramNode>> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(ConvertError::from)?;
        debug!(path = %path.display(), bytes = input.len(), "Read diagram file");
        self.load(&input)
    }

    fn read_cells(&self, input: &str) -> Result<Vec<DiagramNode>, ConvertError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut nodes = Vec::new();
        let mut wrapper: Option<Wrapper> = None;
        let mut in_diagram = false;
        let mut pages = 0usize;
        let mut saw_model = false;
        let mut saw_packed_page = false;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if pages > 1 => {
                    trace!(tag = ?e.name(), "Skipping element on a later page");
                }
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"diagram" => {
                        pages += 1;
                        in_diagram = pages == 1;
                    }
                    b"mxGraphModel" => saw_model = true,
                    b"object" | b"UserObject" => {
                        wrapper = Some(wrapper_from_attributes(read_attributes(e, position)?));
                    }
                    b"mxCell" => {
                        let attributes = read_attributes(e, position)?;
                        nodes.push(cell_from_attributes(attributes, wrapper.as_ref())?);
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"diagram" => pages += 1,
                    b"mxCell" => {
                        let attributes = read_attributes(e, position)?;
                        nodes.push(cell_from_attributes(attributes, wrapper.as_ref())?);
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"diagram" => in_diagram = false,
                    b"object" | b"UserObject" => wrapper = None,
                    _ => {}
                },
                Ok(Event::Text(_)) if in_diagram && !saw_model => {
                    // Page content stored deflated and base64 encoded
                    saw_packed_page = true;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ConvertError::xml_error(e.to_string(), reader.error_position()));
                }
                _ => {}
            }
        }

        if !saw_model {
            let format = if saw_packed_page {
                "compressed draw.io page (save the file uncompressed)"
            } else {
                "document has no mxGraphModel element"
            };
            return Err(ConvertError::unsupported_format(format));
        }
        if pages > 1 {
            warn!("Multi-page diagram, only the first page is read");
        }

        Ok(nodes)
    }
}

impl Loader for DrawioLoader {
    fn load(&self, input: &str) -> Result<Vec<DiagramNode>> {
        let load_span = span!(Level::INFO, "load_drawio", input_len = input.len());
        let _enter = load_span.enter();

        let nodes = self.read_cells(input)?;
        debug!(
            node_count = nodes.len(),
            vertex_count = nodes.iter().filter(|n| n.vertex).count(),
            edge_count = nodes.iter().filter(|n| n.edge).count(),
            "Loaded diagram cells"
        );
        Ok(nodes)
    }

    fn name(&self) -> &'static str {
        "drawio"
    }

    fn can_load(&self, input: &str) -> bool {
        let trimmed = input.trim_start();
        trimmed.contains("<mxfile") || trimmed.contains("<mxGraphModel")
    }
}

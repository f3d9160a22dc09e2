//! 3MF model part parsing.
//!
//! Produces one [`MeshObject`] per `<object>` that holds a `<mesh>`.
//! Objects made only of `<components>` are skipped; their meshes live in
//! other model parts, which are parsed on their own.
//!
//! Build items (transformations) are ignored.

use print_types::{MeshObject, Point3};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::container::ArchiveEntries;
use crate::error::{ParseError, ParseResult};

/// Parse every model part of the archive into mesh objects.
///
/// Objects are numbered from 1 in entry order, since ids from different
/// model parts collide.
///
/// # Errors
///
/// Returns [`ParseError::InvalidXml`] or [`ParseError::InvalidModel`] for the
/// first model part that cannot be parsed.
pub fn read_meshes(entries: &ArchiveEntries) -> ParseResult<Vec<MeshObject>> {
    let mut meshes = Vec::new();
    for (path, xml) in &entries.models {
        meshes.extend(parse_model(path, xml)?);
    }
    for (index, mesh) in meshes.iter_mut().enumerate() {
        mesh.id = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }
    debug!(objects = meshes.len(), "Read mesh objects");
    Ok(meshes)
}

/// Parse one 3MF model part.
///
/// # Errors
///
/// - [`ParseError::InvalidXml`] for malformed XML.
/// - [`ParseError::InvalidModel`] for bad attributes or a face that
///   references a missing vertex.
pub fn parse_model(entry: &str, xml: &str) -> ParseResult<Vec<MeshObject>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut objects = Vec::new();
    let mut current: Option<MeshObject> = None;
    let mut in_mesh = false;
    let mut in_vertices = false;
    let mut in_triangles = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"object" => {
                        current = Some(start_object(entry, e)?);
                    }
                    b"mesh" => in_mesh = current.is_some(),
                    b"vertices" => in_vertices = in_mesh,
                    b"triangles" => in_triangles = in_mesh,
                    b"vertex" if in_vertices => {
                        if let Some(object) = current.as_mut() {
                            object.vertices.push(parse_vertex(entry, e)?);
                        }
                    }
                    b"triangle" if in_triangles => {
                        if let Some(object) = current.as_mut() {
                            object.faces.push(parse_triangle(entry, e)?);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"object" => {
                        if let Some(object) = current.take() {
                            if !object.is_empty() || !object.vertices.is_empty() {
                                validate(entry, &object)?;
                                objects.push(object);
                            }
                        }
                        in_mesh = false;
                    }
                    b"mesh" => in_mesh = false,
                    b"vertices" => in_vertices = false,
                    b"triangles" => in_triangles = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::invalid_xml(entry, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(objects)
}

/// The `Application` metadata of a model part, e.g. `BambuStudio-01.09.00.70`.
#[must_use]
pub fn application_name(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_application = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"metadata" => {
                in_application = attribute(e, b"name")
                    .ok()
                    .flatten()
                    .is_some_and(|name| name.eq_ignore_ascii_case("application"));
            }
            Ok(Event::Text(ref t)) if in_application => {
                return t.unescape().ok().map(|text| text.trim().to_string());
            }
            Ok(Event::End(_)) => in_application = false,
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

fn start_object(entry: &str, element: &BytesStart<'_>) -> ParseResult<MeshObject> {
    let id = match attribute(element, b"id").map_err(|e| ParseError::invalid_model(entry, e))? {
        Some(value) => value
            .parse::<u32>()
            .map_err(|e| ParseError::invalid_model(entry, format!("invalid object id: {e}")))?,
        None => 0,
    };
    let name = attribute(element, b"name")
        .map_err(|e| ParseError::invalid_model(entry, e))?
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Object {id}"));
    Ok(MeshObject::new(id, name))
}

fn parse_vertex(entry: &str, element: &BytesStart<'_>) -> ParseResult<Point3<f64>> {
    let coordinate = |key: &[u8], label: &str| -> ParseResult<f64> {
        let value = attribute(element, key)
            .map_err(|e| ParseError::invalid_model(entry, e))?
            .ok_or_else(|| ParseError::invalid_model(entry, format!("vertex without {label}")))?;
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ParseError::invalid_model(entry, format!("invalid {label} coordinate: {value}"))
            })
    };
    Ok(Point3::new(
        coordinate(b"x", "x")?,
        coordinate(b"y", "y")?,
        coordinate(b"z", "z")?,
    ))
}

fn parse_triangle(entry: &str, element: &BytesStart<'_>) -> ParseResult<[u32; 3]> {
    let index = |key: &[u8], label: &str| -> ParseResult<u32> {
        let value = attribute(element, key)
            .map_err(|e| ParseError::invalid_model(entry, e))?
            .ok_or_else(|| ParseError::invalid_model(entry, format!("triangle without {label}")))?;
        value
            .trim()
            .parse::<u32>()
            .map_err(|e| ParseError::invalid_model(entry, format!("invalid {label} index: {e}")))
    };
    Ok([index(b"v1", "v1")?, index(b"v2", "v2")?, index(b"v3", "v3")?])
}

fn validate(entry: &str, object: &MeshObject) -> ParseResult<()> {
    match object.first_invalid_face() {
        Some(face) => Err(ParseError::invalid_model(
            entry,
            format!(
                "object '{}': triangle {face} references a missing vertex ({} vertices)",
                object.name,
                object.vertices.len()
            ),
        )),
        None => Ok(()),
    }
}

/// Unescaped value of the attribute with local name `key`.
pub(crate) fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| format!("malformed attribute: {e}"))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| format!("invalid attribute value: {e}"))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

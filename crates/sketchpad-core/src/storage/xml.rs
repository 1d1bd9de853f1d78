//! The `drawing` XML document.
//!
//! Leaf values are kept as text while parsing so that a well-formed document
//! with a bad coordinate still parses; coordinates are converted one element
//! at a time by [`Element::add_to`]. Child elements other than `<line>` and
//! `<rectangle>` parse as [`Element::Unknown`] and are skipped.

use super::{StorageError, StorageResult};
use crate::registry::ShapeRegistry;
use crate::shapes::{CanvasPoint, CornerStyle, Shape, ShapeId, StrokeColor};
use serde::{Deserialize, Serialize};

/// Root `<drawing>` element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename = "drawing")]
pub struct DrawingFile {
    #[serde(rename = "$value", default)]
    pub elements: Vec<Element>,
}

/// A persisted primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "line")]
    Line(LineElement),
    #[serde(rename = "rectangle")]
    Rectangle(RectangleElement),
    /// Any other child of `<drawing>`, content discarded.
    #[serde(other, skip_serializing)]
    Unknown,
}

/// `<x>` / `<y>` pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XmlPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<XmlPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<XmlPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RectangleElement {
    #[serde(rename = "upper-left", default, skip_serializing_if = "Option::is_none")]
    pub upper_left: Option<XmlPoint>,
    #[serde(rename = "lower-right", default, skip_serializing_if = "Option::is_none")]
    pub lower_right: Option<XmlPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner: Option<String>,
}

impl From<CanvasPoint> for XmlPoint {
    fn from(p: CanvasPoint) -> Self {
        Self {
            x: Some(p.x.to_string()),
            y: Some(p.y.to_string()),
        }
    }
}

impl XmlPoint {
    fn parse(point: Option<&XmlPoint>, element: &str, name: &str) -> StorageResult<CanvasPoint> {
        let point = point.ok_or_else(|| StorageError::Format(format!("<{element}> is missing <{name}>")))?;
        let x = parse_coord(point.x.as_deref(), element, name, "x")?;
        let y = parse_coord(point.y.as_deref(), element, name, "y")?;
        Ok(CanvasPoint::new(x, y))
    }
}

fn parse_coord(text: Option<&str>, element: &str, point: &str, axis: &str) -> StorageResult<i32> {
    let text = text.ok_or_else(|| StorageError::Format(format!("<{element}><{point}> is missing <{axis}>")))?;
    text.trim().parse().map_err(|e| {
        StorageError::Format(format!("<{element}><{point}><{axis}> has invalid value {text:?}: {e}"))
    })
}

fn check_color(color: Option<&str>, element: &str) {
    if let Some(color) = color {
        if color.trim() != StrokeColor::Black.as_str() {
            log::warn!("ignoring color {color:?} on <{element}>, shapes load as black");
        }
    }
}

impl Element {
    /// Encode a primitive. Groups have no persisted form.
    pub fn from_shape(shape: &Shape) -> Option<Self> {
        let color = Some(StrokeColor::Black.as_str().to_string());
        match shape {
            Shape::Line(line) => Some(Element::Line(LineElement {
                begin: Some(line.start.into()),
                end: Some(line.end.into()),
                color,
            })),
            Shape::Rectangle(rect) => Some(Element::Rectangle(RectangleElement {
                upper_left: Some(rect.upper_left.into()),
                lower_right: Some(rect.lower_right.into()),
                color,
                corner: Some(rect.corner.as_str().to_string()),
            })),
            Shape::Group(_) => None,
        }
    }

    /// Convert this element and append it to `registry`. Unknown elements add
    /// nothing and yield `None`.
    ///
    /// The registry is only touched once every coordinate has parsed.
    pub fn add_to(&self, registry: &mut ShapeRegistry) -> StorageResult<Option<ShapeId>> {
        match self {
            Element::Line(line) => {
                let start = XmlPoint::parse(line.begin.as_ref(), "line", "begin")?;
                let end = XmlPoint::parse(line.end.as_ref(), "line", "end")?;
                check_color(line.color.as_deref(), "line");
                Ok(Some(registry.add_line(start, end)))
            }
            Element::Rectangle(rect) => {
                let upper_left = XmlPoint::parse(rect.upper_left.as_ref(), "rectangle", "upper-left")?;
                let lower_right = XmlPoint::parse(rect.lower_right.as_ref(), "rectangle", "lower-right")?;
                check_color(rect.color.as_deref(), "rectangle");
                let corner = rect
                    .corner
                    .as_deref()
                    .map(CornerStyle::from_label)
                    .unwrap_or_default();
                Ok(Some(registry.add_rectangle(upper_left, lower_right, corner)))
            }
            Element::Unknown => {
                log::warn!("skipping unknown element in <drawing>");
                Ok(None)
            }
        }
    }
}

impl DrawingFile {
    /// Build a document from every primitive in the registry, grouped or not,
    /// in insertion order.
    pub fn from_registry(registry: &ShapeRegistry) -> Self {
        Self {
            elements: registry.primitives().filter_map(Element::from_shape).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize to indented XML text.
    pub fn to_xml(&self) -> StorageResult<String> {
        let mut buffer = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
        serializer.indent(' ', 2);
        self.serialize(serializer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(buffer)
    }

    /// Parse XML text. Fails on malformed XML; coordinate text is not
    /// validated here.
    pub fn from_xml(text: &str) -> StorageResult<Self> {
        quick_xml::de::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

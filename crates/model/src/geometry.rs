//! Opaque GML payloads carried by spatial and temporal operands.
//!
//! Geometry operands are captured, not interpreted: the element structure,
//! attributes and text of the GML payload are preserved so the document can be
//! re-serialized, but no coordinate maths ever happens here. The only reading
//! this module does is the `to_wkt` convenience view, which renders the corner
//! list of a `gml:Box`/`gml:Envelope` as a closed WKT polygon ring.

use nom::{
    IResult, Parser,
    character::complete::{char, multispace0, multispace1},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, separated_pair},
};

/// The GML 2 namespace used by legacy filter documents.
pub const GML2_NAMESPACE: &str = "http://www.opengis.net/gml";

/// The GML 3.2 namespace used by current filter documents.
pub const GML32_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// Returns true for any GML namespace revision.
pub fn is_gml_namespace(namespace: &str) -> bool {
    namespace.starts_with(GML2_NAMESPACE)
}

/// A captured GML element: local name, attributes and ordered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<GmlContent>,
}

/// Ordered content of a captured GML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmlContent {
    Element(GmlElement),
    Text(String),
}

impl GmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a text node. Edge whitespace is trimmed and whitespace-only
    /// text is dropped, matching how payload text is captured from parsed
    /// documents.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.children.push(GmlContent::Text(trimmed.to_string()));
        }
        self
    }

    pub fn with_child(mut self, child: GmlElement) -> Self {
        self.children.push(GmlContent::Element(child));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[GmlContent] {
        &self.children
    }

    /// Finds the first child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&GmlElement> {
        self.children.iter().find_map(|content| match content {
            GmlContent::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, into: &mut String) {
        for content in &self.children {
            match content {
                GmlContent::Text(text) => into.push_str(text),
                GmlContent::Element(element) => element.collect_text(into),
            }
        }
    }
}

/// An uninterpreted geometry (or temporal) payload captured from a filter
/// operand, together with the GML namespace it was expressed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    namespace: String,
    element: GmlElement,
}

impl Geometry {
    /// Wraps a captured element under the GML 3.2 namespace.
    pub fn new(element: GmlElement) -> Self {
        Self {
            namespace: GML32_NAMESPACE.to_string(),
            element,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Builds a `gml:Envelope` payload from two corners.
    pub fn envelope(lower: (f64, f64), upper: (f64, f64)) -> Self {
        Self::new(
            GmlElement::new("Envelope")
                .with_child(
                    GmlElement::new("lowerCorner").with_text(format!("{} {}", lower.0, lower.1)),
                )
                .with_child(
                    GmlElement::new("upperCorner").with_text(format!("{} {}", upper.0, upper.1)),
                ),
        )
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn element(&self) -> &GmlElement {
        &self.element
    }

    /// Local name of the payload root, e.g. `Envelope` or `Box`.
    pub fn name(&self) -> &str {
        self.element.name()
    }

    /// The `srsName` attribute of the payload root, when present.
    pub fn srs_name(&self) -> Option<&str> {
        self.element.attribute("srsName")
    }

    /// Renders the corner list of a `Box` or `Envelope` payload as a closed
    /// WKT polygon ring, with each coordinate pair swapped the way the filter
    /// encoding examples present them. Returns `None` for payload shapes this
    /// view does not recognize.
    pub fn to_wkt(&self) -> Option<String> {
        let corners = match self.element.name() {
            "Box" => {
                let coordinates = self.element.child("coordinates")?;
                parse_coordinate_pairs(&coordinates.text_content())?
            }
            "Envelope" => {
                let lower = parse_corner(&self.element.child("lowerCorner")?.text_content())?;
                let upper = parse_corner(&self.element.child("upperCorner")?.text_content())?;
                vec![lower, upper]
            }
            _ => return None,
        };
        polygon_ring(&corners)
    }
}

/// Formats corner pairs as `POLYGON ((y1 x1, y2 x2, y1 x1))`, closing the
/// ring on the first corner.
fn polygon_ring(corners: &[(f64, f64)]) -> Option<String> {
    if corners.len() < 2 {
        return None;
    }
    let vertices: Vec<String> = corners
        .iter()
        .chain(std::iter::once(&corners[0]))
        .map(|(a, b)| format!("{} {}", b, a))
        .collect();
    Some(format!("POLYGON (({}))", vertices.join(", ")))
}

// --- Coordinate text parsers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn coordinate_pair(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(double, ws(char(',')), double).parse(input)
}

fn coordinate_list(input: &str) -> IResult<&str, Vec<(f64, f64)>> {
    separated_list1(multispace1, coordinate_pair).parse(input)
}

/// Parses a `gml:coordinates` list: comma-separated pairs, whitespace between
/// tuples. Returns `None` unless the whole text is consumed.
fn parse_coordinate_pairs(text: &str) -> Option<Vec<(f64, f64)>> {
    match coordinate_list(text.trim()) {
        Ok(("", pairs)) => Some(pairs),
        _ => None,
    }
}

fn corner_position(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(double, multispace1, double).parse(input)
}

/// Parses a single `lowerCorner`/`upperCorner` position: two numbers
/// separated by whitespace.
fn parse_corner(text: &str) -> Option<(f64, f64)> {
    match corner_position(text.trim()) {
        Ok(("", corner)) => Some(corner),
        _ => None,
    }
}

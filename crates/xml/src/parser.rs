//! Recursive-descent parser from FES 2.0 documents into the filter model.
//!
//! Dispatch is on `(namespace, local name)` over a namespace-resolved
//! `roxmltree` tree. Structural faults (unknown tags, wrong operand counts,
//! missing attributes) surface as `InvalidFilterStructure` with the offending
//! element; nothing is ever built from a partially-read subtree.

use fes_model::{
    BetweenComparisonOperator, BinaryComparisonName, BinaryComparisonOperator, BinaryLogicOperator,
    BinaryLogicType, BinarySpatialOperator, BinaryTemporalOperator, DistanceOperator,
    DistanceOperatorName, Expression, Filter, FilterError, Function, Geometry, GmlElement,
    LikeOperator, Literal, MatchAction, Measure, NilOperator, NullOperator, Operand, Operator,
    ResourceId, SpatialOperatorName, TemporalOperatorName, UnaryLogicOperator, UnaryLogicType,
    ValueReference, is_gml_namespace,
};
use roxmltree::{Document, Node};

use crate::error::ParseError;
use crate::ns::{FES_NAMESPACE, gml_name};

// --- Entry points ---

/// Parses a complete filter document from its XML text.
pub fn parse_filter(xml: &str) -> Result<Filter, ParseError> {
    log::debug!("parsing filter document ({} bytes)", xml.len());
    let document = Document::parse(xml)?;
    parse_filter_document(&document)
}

/// Parses a filter from an already-parsed document, for callers that manage
/// their own XML reading.
pub fn parse_filter_document(document: &Document) -> Result<Filter, ParseError> {
    let root = document.root_element();
    if !is_fes(root) || root.tag_name().name() != "Filter" {
        return Err(invalid(root, "the document root must be fes:Filter"));
    }

    let children: Vec<Node> = element_children(root).collect();
    if children.is_empty() {
        return Err(invalid(
            root,
            "a filter needs one predicate or at least one ResourceId",
        ));
    }

    let id_count = children
        .iter()
        .filter(|child| is_resource_id(**child))
        .count();
    if id_count == children.len() {
        let ids = children
            .iter()
            .map(|child| parse_resource_id(*child))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("filter selects {} resource ids", ids.len());
        return Ok(Filter::matching_ids(ids)?);
    }
    if id_count > 0 {
        return Err(invalid(root, "resource ids cannot be mixed with a predicate"));
    }
    if children.len() > 1 {
        return Err(invalid(root, "a filter holds exactly one predicate"));
    }
    Ok(Filter::Predicate(parse_operand(children[0])?))
}

// --- Node classification ---

fn is_fes(node: Node) -> bool {
    node.tag_name().namespace() == Some(FES_NAMESPACE)
}

fn is_resource_id(node: Node) -> bool {
    is_fes(node) && node.tag_name().name() == "ResourceId"
}

fn is_operator_element(node: Node) -> bool {
    is_fes(node) && is_operator_tag(node.tag_name().name())
}

fn is_operator_tag(local: &str) -> bool {
    BinaryComparisonName::from_tag(local).is_some()
        || BinaryLogicType::from_tag(local).is_some()
        || UnaryLogicType::from_tag(local).is_some()
        || SpatialOperatorName::from_tag(local).is_some()
        || DistanceOperatorName::from_tag(local).is_some()
        || TemporalOperatorName::from_tag(local).is_some()
        || matches!(
            local,
            "PropertyIsLike" | "PropertyIsBetween" | "PropertyIsNull" | "PropertyIsNil"
        )
}

fn is_expression_element(node: Node) -> bool {
    match node.tag_name().namespace() {
        Some(namespace) if namespace == FES_NAMESPACE => matches!(
            node.tag_name().name(),
            "Literal" | "ValueReference" | "Function"
        ),
        Some(namespace) => is_gml_namespace(namespace),
        None => false,
    }
}

// --- Shared helpers ---

fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

fn invalid(node: Node, message: impl Into<String>) -> ParseError {
    ParseError::InvalidFilterStructure {
        element: node.tag_name().name().to_string(),
        message: message.into(),
    }
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str, ParseError> {
    node.attribute(name)
        .ok_or_else(|| invalid(node, format!("missing required attribute '{}'", name)))
}

fn parse_xml_boolean(node: Node, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(node, format!("'{}' is not a boolean", value))),
    }
}

/// Concatenated character content of an element. `Node::text` stops at the
/// first text child, which loses content when a comment or processing
/// instruction splits the text.
fn text_content(node: Node) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

// --- Operators ---

fn parse_operand(node: Node) -> Result<Operand, ParseError> {
    if is_operator_element(node) {
        Ok(Operand::Operator(Box::new(parse_operator(node)?)))
    } else if is_expression_element(node) {
        Ok(Operand::Expression(parse_expression(node)?))
    } else {
        Err(invalid(node, "expected a predicate operator or an expression"))
    }
}

fn parse_operator(node: Node) -> Result<Operator, ParseError> {
    if !is_fes(node) {
        return Err(invalid(node, "predicate elements must be in the fes namespace"));
    }
    let local = node.tag_name().name();
    if let Some(name) = BinaryComparisonName::from_tag(local) {
        return Ok(Operator::Comparison(parse_binary_comparison(node, name)?));
    }
    if let Some(kind) = BinaryLogicType::from_tag(local) {
        return Ok(Operator::BinaryLogic(parse_binary_logic(node, kind)?));
    }
    if UnaryLogicType::from_tag(local).is_some() {
        return Ok(Operator::UnaryLogic(parse_negation(node)?));
    }
    if let Some(name) = SpatialOperatorName::from_tag(local) {
        return Ok(Operator::Spatial(parse_spatial(node, name)?));
    }
    if let Some(name) = DistanceOperatorName::from_tag(local) {
        return Ok(Operator::Distance(parse_distance(node, name)?));
    }
    if let Some(name) = TemporalOperatorName::from_tag(local) {
        return Ok(Operator::Temporal(parse_temporal(node, name)?));
    }
    match local {
        "PropertyIsLike" => Ok(Operator::Like(parse_like(node)?)),
        "PropertyIsBetween" => Ok(Operator::Between(parse_between(node)?)),
        "PropertyIsNull" => Ok(Operator::Null(NullOperator {
            expression: one_expression(node)?,
        })),
        "PropertyIsNil" => Ok(Operator::Nil(NilOperator {
            expression: one_expression(node)?,
            nil_reason: node.attribute("nilReason").map(str::to_string),
        })),
        _ => Err(invalid(node, "unknown predicate operator")),
    }
}

fn parse_binary_comparison(
    node: Node,
    name: BinaryComparisonName,
) -> Result<BinaryComparisonOperator, ParseError> {
    let (first_expression, second_expression) = two_expressions(node)?;
    let match_case = match node.attribute("matchCase") {
        Some(value) => parse_xml_boolean(node, value)?,
        None => true,
    };
    let match_action = match node.attribute("matchAction") {
        Some(value) => MatchAction::from_name(value)
            .ok_or_else(|| invalid(node, format!("'{}' is not a matchAction", value)))?,
        None => MatchAction::default(),
    };
    Ok(BinaryComparisonOperator {
        name,
        first_expression,
        second_expression,
        match_case,
        match_action,
    })
}

fn parse_like(node: Node) -> Result<LikeOperator, ParseError> {
    let wild_card = required_attribute(node, "wildCard")?.to_string();
    let single_char = required_attribute(node, "singleChar")?.to_string();
    let escape_char = required_attribute(node, "escapeChar")?.to_string();
    let (first_expression, second_expression) = two_expressions(node)?;
    Ok(LikeOperator {
        first_expression,
        second_expression,
        wild_card,
        single_char,
        escape_char,
    })
}

fn parse_between(node: Node) -> Result<BetweenComparisonOperator, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 3 {
        return Err(invalid(
            node,
            "PropertyIsBetween takes an expression and two boundaries",
        ));
    }
    Ok(BetweenComparisonOperator {
        expression: parse_expression(children[0])?,
        lower_boundary: boundary_expression(children[1], "LowerBoundary")?,
        upper_boundary: boundary_expression(children[2], "UpperBoundary")?,
    })
}

fn boundary_expression(node: Node, expected: &str) -> Result<Expression, ParseError> {
    if !is_fes(node) || node.tag_name().name() != expected {
        return Err(invalid(node, format!("expected a {} element", expected)));
    }
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 1 {
        return Err(invalid(node, "a boundary wraps exactly one expression"));
    }
    parse_expression(children[0])
}

fn parse_binary_logic(
    node: Node,
    kind: BinaryLogicType,
) -> Result<BinaryLogicOperator, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 2 {
        return Err(invalid(
            node,
            format!("{} takes exactly two operands, found {}", kind, children.len()),
        ));
    }
    Ok(BinaryLogicOperator {
        kind,
        first_operand: parse_operand(children[0])?,
        second_operand: parse_operand(children[1])?,
    })
}

fn parse_negation(node: Node) -> Result<UnaryLogicOperator, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 1 {
        return Err(invalid(node, "Not takes exactly one operand"));
    }
    if !is_operator_element(children[0]) {
        return Err(invalid(
            children[0],
            "negation applies to a predicate, not an expression",
        ));
    }
    Ok(UnaryLogicOperator {
        kind: UnaryLogicType::Not,
        operand: Box::new(parse_operator(children[0])?),
    })
}

fn parse_spatial(
    node: Node,
    name: SpatialOperatorName,
) -> Result<BinarySpatialOperator, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 2 {
        return Err(invalid(node, "a spatial operator takes an expression and a geometry"));
    }
    Ok(BinarySpatialOperator {
        name,
        first_operand: parse_expression(children[0])?,
        second_operand: parse_geometry(children[1])?,
    })
}

fn parse_distance(node: Node, name: DistanceOperatorName) -> Result<DistanceOperator, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 3 {
        return Err(invalid(
            node,
            "a distance operator takes an expression, a geometry and a Distance",
        ));
    }
    Ok(DistanceOperator {
        name,
        first_operand: parse_expression(children[0])?,
        second_operand: parse_geometry(children[1])?,
        distance: parse_measure(children[2])?,
    })
}

fn parse_measure(node: Node) -> Result<Measure, ParseError> {
    if !is_fes(node) || node.tag_name().name() != "Distance" {
        return Err(invalid(node, "expected a Distance element"));
    }
    let uom = required_attribute(node, "uom")?.to_string();
    let content = text_content(node);
    let text = content.trim();
    let value = text
        .parse::<f64>()
        .map_err(|_| invalid(node, format!("'{}' is not a distance value", text)))?;
    Ok(Measure { value, uom })
}

fn parse_temporal(
    node: Node,
    name: TemporalOperatorName,
) -> Result<BinaryTemporalOperator, ParseError> {
    let (first_expression, second_expression) = two_expressions(node)?;
    Ok(BinaryTemporalOperator {
        name,
        first_expression,
        second_expression,
    })
}

fn parse_resource_id(node: Node) -> Result<ResourceId, ParseError> {
    Ok(ResourceId {
        rid: required_attribute(node, "rid")?.to_string(),
        previous_rid: node.attribute("previousRid").map(str::to_string),
        version: node.attribute("version").map(str::to_string),
        start_date: node.attribute("startDate").map(str::to_string),
        end_date: node.attribute("endDate").map(str::to_string),
    })
}

// --- Expressions ---

fn two_expressions(node: Node) -> Result<(Expression, Expression), ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 2 {
        return Err(invalid(
            node,
            format!("expected two expressions, found {}", children.len()),
        ));
    }
    Ok((parse_expression(children[0])?, parse_expression(children[1])?))
}

fn one_expression(node: Node) -> Result<Expression, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if children.len() != 1 {
        return Err(invalid(
            node,
            format!("expected one expression, found {}", children.len()),
        ));
    }
    parse_expression(children[0])
}

fn parse_expression(node: Node) -> Result<Expression, ParseError> {
    if let Some(namespace) = node.tag_name().namespace() {
        if is_gml_namespace(namespace) {
            return Ok(Expression::Literal(Literal::new(parse_geometry(node)?)));
        }
        if namespace == FES_NAMESPACE {
            return match node.tag_name().name() {
                "Literal" => Ok(Expression::Literal(parse_literal(node)?)),
                "ValueReference" => Ok(Expression::ValueReference(ValueReference::new(
                    text_content(node),
                ))),
                "Function" => Ok(Expression::Function(parse_function(node)?)),
                _ => Err(non_expression(node)),
            };
        }
    }
    Err(non_expression(node))
}

fn non_expression(node: Node) -> ParseError {
    ParseError::Model(FilterError::InvalidExpression {
        element: node.tag_name().name().to_string(),
    })
}

fn parse_function(node: Node) -> Result<Function, ParseError> {
    let name = required_attribute(node, "name")?;
    let arguments = element_children(node)
        .map(parse_expression)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Function::new(name, arguments))
}

fn parse_literal(node: Node) -> Result<Literal, ParseError> {
    let children: Vec<Node> = element_children(node).collect();
    if let Some(first) = children.first() {
        if children.len() > 1 {
            return Err(invalid(node, "a literal holds at most one payload element"));
        }
        return match first.tag_name().namespace() {
            Some(namespace) if is_gml_namespace(namespace) => {
                Ok(Literal::new(parse_geometry(*first)?))
            }
            _ => Err(invalid(*first, "only GML payloads may appear inside a literal")),
        };
    }

    let text = text_content(node);
    match node.attribute("type") {
        None => Ok(Literal::new(text)),
        Some(type_name) => coerce_typed_literal(node, type_name, &text),
    }
}

/// Applies the `type` attribute of a literal: the XSD integer, floating point
/// and boolean families coerce the text, anything else stays a string.
fn coerce_typed_literal(node: Node, type_name: &str, text: &str) -> Result<Literal, ParseError> {
    let local = type_name.rsplit(':').next().unwrap_or(type_name);
    let trimmed = text.trim();
    match local {
        "int" | "integer" | "long" | "short" | "byte" => trimmed
            .parse::<i64>()
            .map(Literal::new)
            .map_err(|_| invalid(node, format!("'{}' is not a valid {} literal", trimmed, local))),
        "double" | "float" | "decimal" => trimmed
            .parse::<f64>()
            .map(Literal::new)
            .map_err(|_| invalid(node, format!("'{}' is not a valid {} literal", trimmed, local))),
        "boolean" => match trimmed {
            "true" | "1" => Ok(Literal::new(true)),
            "false" | "0" => Ok(Literal::new(false)),
            _ => Err(invalid(node, format!("'{}' is not a valid boolean literal", trimmed))),
        },
        _ => Ok(Literal::new(text)),
    }
}

// --- Geometry payload capture ---

fn parse_geometry(node: Node) -> Result<Geometry, ParseError> {
    let namespace = match node.tag_name().namespace() {
        Some(namespace) if is_gml_namespace(namespace) => namespace,
        _ => return Err(invalid(node, "expected a GML geometry element")),
    };
    Ok(Geometry::new(capture_gml_element(node)?).with_namespace(namespace))
}

fn capture_gml_element(node: Node) -> Result<GmlElement, ParseError> {
    let mut element = GmlElement::new(node.tag_name().name());
    for attribute in node.attributes() {
        let name = match attribute.namespace() {
            None => attribute.name().to_string(),
            Some(namespace) if is_gml_namespace(namespace) => gml_name(attribute.name()),
            // Foreign-namespace attributes carry no filter semantics.
            Some(_) => continue,
        };
        element = element.with_attribute(name, attribute.value());
    }
    for child in node.children() {
        if child.is_element() {
            match child.tag_name().namespace() {
                Some(namespace) if is_gml_namespace(namespace) => {
                    element = element.with_child(capture_gml_element(child)?);
                }
                _ => {
                    return Err(invalid(child, "geometry payloads may only contain GML elements"));
                }
            }
        } else if child.is_text() {
            // `with_text` trims and drops whitespace-only runs.
            element = element.with_text(child.text().unwrap_or(""));
        }
    }
    Ok(element)
}

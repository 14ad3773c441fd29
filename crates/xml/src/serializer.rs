//! Event-writer serialization of filter trees back to FES 2.0 XML.
//!
//! Output is compact (no indentation) with the `fes` prefix on every filter
//! element. `xmlns:fes` is always declared on the root; `xmlns:xs` only when
//! a pre-scan finds typed literals, and `xmlns:gml` on each geometry payload
//! root, carrying the namespace the payload was captured under. Attributes
//! are written only when they differ from their defaults, so fresh trees
//! serialize to the minimal document.

use std::io::Write;

use fes_model::{
    Expression, Filter, Geometry, GmlContent, GmlElement, Literal, LiteralValue, MatchAction,
    Measure, Operand, Operator, ResourceId,
};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::SerializeError;
use crate::ns::{FES_NAMESPACE, XS_NAMESPACE, fes_name, gml_name};

/// Serializes a filter to an XML string.
pub fn serialize_filter(filter: &Filter) -> Result<String, SerializeError> {
    let mut buffer = Vec::new();
    write_filter(filter, &mut buffer)?;
    log::debug!("serialized filter to {} bytes", buffer.len());
    Ok(String::from_utf8(buffer)?)
}

/// Writes a filter document to any `io::Write` target.
pub fn write_filter<W: Write>(filter: &Filter, target: W) -> Result<(), SerializeError> {
    let mut writer = Writer::new(target);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let name = fes_name("Filter");
    let mut root = BytesStart::new(name.as_str());
    root.push_attribute(("xmlns:fes", FES_NAMESPACE));
    if uses_typed_literals(filter) {
        root.push_attribute(("xmlns:xs", XS_NAMESPACE));
    }
    writer.write_event(Event::Start(root))?;

    match filter {
        Filter::Predicate(operand) => write_operand(&mut writer, operand)?,
        Filter::ResourceIds(ids) => {
            for id in ids {
                write_resource_id(&mut writer, id)?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

// --- Namespace pre-scan ---

fn uses_typed_literals(filter: &Filter) -> bool {
    match filter {
        Filter::Predicate(operand) => operand_has_typed_literal(operand),
        Filter::ResourceIds(_) => false,
    }
}

fn operand_has_typed_literal(operand: &Operand) -> bool {
    match operand {
        Operand::Operator(operator) => operator_has_typed_literal(operator),
        Operand::Expression(expression) => expression_has_typed_literal(expression),
    }
}

fn operator_has_typed_literal(operator: &Operator) -> bool {
    match operator {
        Operator::Comparison(comparison) => {
            expression_has_typed_literal(&comparison.first_expression)
                || expression_has_typed_literal(&comparison.second_expression)
        }
        Operator::Like(like) => {
            expression_has_typed_literal(&like.first_expression)
                || expression_has_typed_literal(&like.second_expression)
        }
        Operator::Between(between) => {
            expression_has_typed_literal(&between.expression)
                || expression_has_typed_literal(&between.lower_boundary)
                || expression_has_typed_literal(&between.upper_boundary)
        }
        Operator::Null(null) => expression_has_typed_literal(&null.expression),
        Operator::Nil(nil) => expression_has_typed_literal(&nil.expression),
        Operator::BinaryLogic(logic) => {
            operand_has_typed_literal(&logic.first_operand)
                || operand_has_typed_literal(&logic.second_operand)
        }
        Operator::UnaryLogic(negation) => operator_has_typed_literal(&negation.operand),
        Operator::Spatial(spatial) => expression_has_typed_literal(&spatial.first_operand),
        Operator::Distance(distance) => expression_has_typed_literal(&distance.first_operand),
        Operator::Temporal(temporal) => {
            expression_has_typed_literal(&temporal.first_expression)
                || expression_has_typed_literal(&temporal.second_expression)
        }
    }
}

fn expression_has_typed_literal(expression: &Expression) -> bool {
    match expression {
        Expression::Literal(literal) => matches!(
            literal.value(),
            LiteralValue::Integer(_) | LiteralValue::Double(_) | LiteralValue::Boolean(_)
        ),
        Expression::ValueReference(_) => false,
        Expression::Function(function) => {
            function.arguments().iter().any(expression_has_typed_literal)
        }
    }
}

// --- Writers ---

fn write_operand<W: Write>(
    writer: &mut Writer<W>,
    operand: &Operand,
) -> Result<(), SerializeError> {
    match operand {
        Operand::Operator(operator) => write_operator(writer, operator),
        Operand::Expression(expression) => write_expression(writer, expression),
    }
}

fn write_operator<W: Write>(
    writer: &mut Writer<W>,
    operator: &Operator,
) -> Result<(), SerializeError> {
    let name = fes_name(operator.tag());
    match operator {
        Operator::Comparison(comparison) => {
            let mut start = BytesStart::new(name.as_str());
            if !comparison.match_case {
                start.push_attribute(("matchCase", "false"));
            }
            if comparison.match_action != MatchAction::Any {
                start.push_attribute(("matchAction", comparison.match_action.name()));
            }
            writer.write_event(Event::Start(start))?;
            write_expression(writer, &comparison.first_expression)?;
            write_expression(writer, &comparison.second_expression)?;
        }
        Operator::Like(like) => {
            let mut start = BytesStart::new(name.as_str());
            start.push_attribute(("wildCard", like.wild_card.as_str()));
            start.push_attribute(("singleChar", like.single_char.as_str()));
            start.push_attribute(("escapeChar", like.escape_char.as_str()));
            writer.write_event(Event::Start(start))?;
            write_expression(writer, &like.first_expression)?;
            write_expression(writer, &like.second_expression)?;
        }
        Operator::Between(between) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_expression(writer, &between.expression)?;
            write_wrapped(writer, "LowerBoundary", &between.lower_boundary)?;
            write_wrapped(writer, "UpperBoundary", &between.upper_boundary)?;
        }
        Operator::Null(null) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_expression(writer, &null.expression)?;
        }
        Operator::Nil(nil) => {
            let mut start = BytesStart::new(name.as_str());
            if let Some(reason) = &nil.nil_reason {
                start.push_attribute(("nilReason", reason.as_str()));
            }
            writer.write_event(Event::Start(start))?;
            write_expression(writer, &nil.expression)?;
        }
        Operator::BinaryLogic(logic) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_operand(writer, &logic.first_operand)?;
            write_operand(writer, &logic.second_operand)?;
        }
        Operator::UnaryLogic(negation) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_operator(writer, &negation.operand)?;
        }
        Operator::Spatial(spatial) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_expression(writer, &spatial.first_operand)?;
            write_geometry(writer, &spatial.second_operand)?;
        }
        Operator::Distance(distance) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_expression(writer, &distance.first_operand)?;
            write_geometry(writer, &distance.second_operand)?;
            write_measure(writer, &distance.distance)?;
        }
        Operator::Temporal(temporal) => {
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            write_expression(writer, &temporal.first_expression)?;
            write_expression(writer, &temporal.second_expression)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_wrapped<W: Write>(
    writer: &mut Writer<W>,
    local: &str,
    expression: &Expression,
) -> Result<(), SerializeError> {
    let name = fes_name(local);
    writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
    write_expression(writer, expression)?;
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_expression<W: Write>(
    writer: &mut Writer<W>,
    expression: &Expression,
) -> Result<(), SerializeError> {
    match expression {
        Expression::Literal(literal) => write_literal(writer, literal),
        Expression::ValueReference(reference) => {
            let name = fes_name("ValueReference");
            writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
            writer.write_event(Event::Text(BytesText::new(reference.value())))?;
            writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            Ok(())
        }
        Expression::Function(function) => {
            let name = fes_name("Function");
            let mut start = BytesStart::new(name.as_str());
            start.push_attribute(("name", function.name()));
            writer.write_event(Event::Start(start))?;
            for argument in function.arguments() {
                write_expression(writer, argument)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            Ok(())
        }
    }
}

fn write_literal<W: Write>(
    writer: &mut Writer<W>,
    literal: &Literal,
) -> Result<(), SerializeError> {
    // Geometry payloads are their own element; no fes:Literal wrapper.
    if let LiteralValue::Geometry(geometry) = literal.value() {
        return write_geometry(writer, geometry);
    }

    let name = fes_name("Literal");
    let mut start = BytesStart::new(name.as_str());
    match literal.value() {
        LiteralValue::Integer(_) => start.push_attribute(("type", "xs:integer")),
        LiteralValue::Double(_) => start.push_attribute(("type", "xs:double")),
        LiteralValue::Boolean(_) => start.push_attribute(("type", "xs:boolean")),
        LiteralValue::String(_) | LiteralValue::Geometry(_) => {}
    }
    writer.write_event(Event::Start(start))?;
    let text = literal.value().to_string();
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_geometry<W: Write>(
    writer: &mut Writer<W>,
    geometry: &Geometry,
) -> Result<(), SerializeError> {
    write_gml_element(writer, geometry.element(), Some(geometry.namespace()))
}

fn write_gml_element<W: Write>(
    writer: &mut Writer<W>,
    element: &GmlElement,
    declare_namespace: Option<&str>,
) -> Result<(), SerializeError> {
    let name = gml_name(element.name());
    let mut start = BytesStart::new(name.as_str());
    if let Some(namespace) = declare_namespace {
        start.push_attribute(("xmlns:gml", namespace));
    }
    for (attribute, value) in element.attributes() {
        start.push_attribute((attribute.as_str(), value.as_str()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for content in element.children() {
        match content {
            GmlContent::Element(child) => write_gml_element(writer, child, None)?,
            GmlContent::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_measure<W: Write>(
    writer: &mut Writer<W>,
    measure: &Measure,
) -> Result<(), SerializeError> {
    let name = fes_name("Distance");
    let mut start = BytesStart::new(name.as_str());
    start.push_attribute(("uom", measure.uom.as_str()));
    writer.write_event(Event::Start(start))?;
    let value = measure.value.to_string();
    writer.write_event(Event::Text(BytesText::new(&value)))?;
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_resource_id<W: Write>(
    writer: &mut Writer<W>,
    id: &ResourceId,
) -> Result<(), SerializeError> {
    let name = fes_name("ResourceId");
    let mut start = BytesStart::new(name.as_str());
    start.push_attribute(("rid", id.rid.as_str()));
    if let Some(previous_rid) = &id.previous_rid {
        start.push_attribute(("previousRid", previous_rid.as_str()));
    }
    if let Some(version) = &id.version {
        start.push_attribute(("version", version.as_str()));
    }
    if let Some(start_date) = &id.start_date {
        start.push_attribute(("startDate", start_date.as_str()));
    }
    if let Some(end_date) = &id.end_date {
        start.push_attribute(("endDate", end_date.as_str()));
    }
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fes_model::{
        BinaryComparisonName, BinaryComparisonOperator, BinaryLogicOperator, GML2_NAMESPACE,
        UnaryLogicOperator, ValueReference,
    };

    #[test]
    fn test_serialize_simple_comparison() {
        let filter = Filter::predicate(BinaryComparisonOperator::new(
            BinaryComparisonName::EqualTo,
            ValueReference::new("SomeProperty"),
            Literal::new("100"),
        ));
        let xml = serialize_filter(&filter).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\">\
             <fes:PropertyIsEqualTo>\
             <fes:ValueReference>SomeProperty</fes:ValueReference>\
             <fes:Literal>100</fes:Literal>\
             </fes:PropertyIsEqualTo>\
             </fes:Filter>"
        );
    }

    #[test]
    fn test_default_attributes_are_omitted() {
        let strict = Filter::predicate(BinaryComparisonOperator::new(
            BinaryComparisonName::EqualTo,
            ValueReference::new("NAME"),
            Literal::new("smith"),
        ));
        let xml = serialize_filter(&strict).unwrap();
        assert!(!xml.contains("matchCase"));
        assert!(!xml.contains("matchAction"));

        let relaxed = Filter::predicate(
            BinaryComparisonOperator::new(
                BinaryComparisonName::EqualTo,
                ValueReference::new("NAME"),
                Literal::new("smith"),
            )
            .with_match_case(false)
            .with_match_action(MatchAction::One),
        );
        let xml = serialize_filter(&relaxed).unwrap();
        assert!(xml.contains("matchCase=\"false\""));
        assert!(xml.contains("matchAction=\"One\""));
    }

    #[test]
    fn test_typed_literal_declares_the_schema_namespace() {
        let filter = Filter::predicate(BinaryComparisonOperator::new(
            BinaryComparisonName::LessThan,
            ValueReference::new("DEPTH"),
            Literal::new(30),
        ));
        let xml = serialize_filter(&filter).unwrap();
        assert!(xml.contains("xmlns:xs=\"http://www.w3.org/2001/XMLSchema\""));
        assert!(xml.contains("<fes:Literal type=\"xs:integer\">30</fes:Literal>"));

        let untyped = Filter::predicate(BinaryComparisonOperator::new(
            BinaryComparisonName::LessThan,
            ValueReference::new("DEPTH"),
            Literal::new("30"),
        ));
        assert!(!serialize_filter(&untyped).unwrap().contains("xmlns:xs"));
    }

    #[test]
    fn test_geometry_payload_carries_its_namespace() {
        let geometry = Geometry::new(
            GmlElement::new("Box")
                .with_attribute("srsName", "urn:x-ogc:def:crs:EPSG:4326")
                .with_child(
                    GmlElement::new("coordinates").with_text("13.0983,31.5899 35.5472,42.8143"),
                ),
        )
        .with_namespace(GML2_NAMESPACE);
        let filter = Filter::predicate(UnaryLogicOperator::not(Operator::Spatial(
            fes_model::BinarySpatialOperator::new(
                fes_model::SpatialOperatorName::Disjoint,
                ValueReference::new("Geometry"),
                geometry,
            ),
        )));
        let xml = serialize_filter(&filter).unwrap();
        assert!(xml.contains(
            "<gml:Box xmlns:gml=\"http://www.opengis.net/gml\" \
             srsName=\"urn:x-ogc:def:crs:EPSG:4326\">"
        ));
        assert!(
            xml.contains("<gml:coordinates>13.0983,31.5899 35.5472,42.8143</gml:coordinates>")
        );
        // The payload namespace stays local to the payload.
        assert!(
            !xml.contains("<fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\" xmlns:gml")
        );
    }

    #[test]
    fn test_resource_ids_serialize_as_empty_elements() {
        let filter = Filter::matching_ids(vec![
            ResourceId::new("apts.1"),
            ResourceId::new("apts.2").with_version("3"),
        ])
        .unwrap();
        let xml = serialize_filter(&filter).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\">\
             <fes:ResourceId rid=\"apts.1\"/>\
             <fes:ResourceId rid=\"apts.2\" version=\"3\"/>\
             </fes:Filter>"
        );
    }

    #[test]
    fn test_logic_tree_nests_in_grammar_order() {
        let filter = Filter::predicate(BinaryLogicOperator::and(
            BinaryComparisonOperator::new(
                BinaryComparisonName::GreaterThanOrEqualTo,
                ValueReference::new("DEPTH"),
                Literal::new("100"),
            ),
            BinaryComparisonOperator::new(
                BinaryComparisonName::LessThan,
                ValueReference::new("DEPTH"),
                Literal::new("200"),
            ),
        ));
        let xml = serialize_filter(&filter).unwrap();
        let greater = xml.find("PropertyIsGreaterThanOrEqualTo").unwrap();
        let less = xml.find("PropertyIsLessThan").unwrap();
        assert!(greater < less);
        assert!(xml.contains("<fes:And><fes:PropertyIsGreaterThanOrEqualTo>"));
    }

    #[test]
    fn test_escaping_in_text_and_attributes() {
        let filter = Filter::predicate(BinaryComparisonOperator::new(
            BinaryComparisonName::EqualTo,
            ValueReference::new("NAME"),
            Literal::new("Smith & Sons <Ltd>"),
        ));
        let xml = serialize_filter(&filter).unwrap();
        assert!(xml.contains("Smith &amp; Sons &lt;Ltd&gt;"));
    }
}

//! Integration tests over complete FES 2.0 example documents.

use fes::{
    BinaryComparisonName, BinaryComparisonOperator, Expression, Filter, FilterError, Literal,
    Operator, ParseError, ResourceId, SpatialOperatorName, ValueReference, parse_filter,
};

#[test]
fn test_minimal_comparison_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
   <fes:PropertyIsEqualTo>
      <fes:ValueReference>SomeProperty</fes:ValueReference>
      <fes:Literal>100</fes:Literal>
   </fes:PropertyIsEqualTo>
</fes:Filter>"#;
    let filter = parse_filter(xml).unwrap();
    let expected = Filter::predicate(BinaryComparisonOperator::new(
        BinaryComparisonName::EqualTo,
        ValueReference::new("SomeProperty"),
        Literal::new("100"),
    ));
    assert_eq!(filter, expected);
}

#[test]
fn test_depth_filter_keeps_literal_as_string() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
   <fes:PropertyIsLessThan>
      <fes:ValueReference>DEPTH</fes:ValueReference>
      <fes:Literal>30</fes:Literal>
   </fes:PropertyIsLessThan>
</fes:Filter>"#;
    let filter = parse_filter(xml).unwrap();
    let expected = Filter::predicate(BinaryComparisonOperator::new(
        BinaryComparisonName::LessThan,
        ValueReference::new("DEPTH"),
        Literal::new("30"),
    ));
    assert_eq!(filter, expected);

    // No silent numeric coercion: the text stays a string literal.
    let Operator::Comparison(comparison) = filter.as_predicate().unwrap().as_operator().unwrap()
    else {
        panic!("expected a comparison");
    };
    assert_eq!(
        comparison.second_expression.as_literal().unwrap().value().as_str(),
        Some("30")
    );
}

#[test]
fn test_negated_disjoint_with_legacy_gml_box() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter
   xmlns:fes="http://www.opengis.net/fes/2.0"
   xmlns:gml="http://www.opengis.net/gml">
   <fes:Not>
      <fes:Disjoint>
         <fes:ValueReference>Geometry</fes:ValueReference>
         <gml:Box srsName="urn:x-ogc:def:crs:EPSG:4326">
            <gml:coordinates>13.0983,31.5899 35.5472,42.8143</gml:coordinates>
         </gml:Box>
      </fes:Disjoint>
   </fes:Not>
</fes:Filter>"#;
    let filter = parse_filter(xml).unwrap();

    let Operator::UnaryLogic(negation) = filter.as_predicate().unwrap().as_operator().unwrap()
    else {
        panic!("expected Not at the root");
    };
    let Operator::Spatial(disjoint) = negation.operand.as_ref() else {
        panic!("expected Disjoint under Not");
    };
    assert_eq!(disjoint.name, SpatialOperatorName::Disjoint);
    assert_eq!(
        disjoint.first_operand,
        Expression::ValueReference(ValueReference::new("Geometry"))
    );

    let geometry = &disjoint.second_operand;
    assert_eq!(geometry.namespace(), "http://www.opengis.net/gml");
    assert_eq!(geometry.srs_name(), Some("urn:x-ogc:def:crs:EPSG:4326"));
    assert_eq!(
        geometry.to_wkt().as_deref(),
        Some("POLYGON ((31.5899 13.0983, 42.8143 35.5472, 31.5899 13.0983))")
    );
}

#[test]
fn test_resource_id_selection_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
   <fes:ResourceId rid="apts.1"/>
   <fes:ResourceId rid="apts.2"/>
   <fes:ResourceId rid="apts.3"/>
   <fes:ResourceId rid="apts.4"/>
   <fes:ResourceId rid="apts.5"/>
   <fes:ResourceId rid="apts.6"/>
</fes:Filter>"#;
    let filter = parse_filter(xml).unwrap();
    let ids = filter.resource_ids().unwrap();
    assert_eq!(ids.len(), 6);
    let rids: Vec<&str> = ids.iter().map(|id| id.rid.as_str()).collect();
    assert_eq!(
        rids,
        ["apts.1", "apts.2", "apts.3", "apts.4", "apts.5", "apts.6"]
    );
    assert_eq!(ids[0], ResourceId::new("apts.1"));
}

#[test]
fn test_nested_logic_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
   <fes:And>
      <fes:Or>
         <fes:PropertyIsEqualTo>
            <fes:ValueReference>FIELD1</fes:ValueReference>
            <fes:Literal>10</fes:Literal>
         </fes:PropertyIsEqualTo>
         <fes:PropertyIsEqualTo>
            <fes:ValueReference>FIELD1</fes:ValueReference>
            <fes:Literal>20</fes:Literal>
         </fes:PropertyIsEqualTo>
      </fes:Or>
      <fes:PropertyIsEqualTo>
         <fes:ValueReference>STATUS</fes:ValueReference>
         <fes:Literal>active</fes:Literal>
      </fes:PropertyIsEqualTo>
   </fes:And>
</fes:Filter>"#;
    let filter = parse_filter(xml).unwrap();
    let Operator::BinaryLogic(and) = filter.as_predicate().unwrap().as_operator().unwrap() else {
        panic!("expected And at the root");
    };
    let Operator::BinaryLogic(or) = and.first_operand.as_operator().unwrap() else {
        panic!("expected Or as the first operand");
    };
    assert_eq!(or.kind.tag(), "Or");
    assert!(and.second_operand.as_operator().is_some());
}

#[test]
fn test_non_expression_element_in_argument_position() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
   <fes:PropertyIsEqualTo>
      <fes:Function name="lookup">
         <fes:Not>
            <fes:PropertyIsNull><fes:ValueReference>X</fes:ValueReference></fes:PropertyIsNull>
         </fes:Not>
      </fes:Function>
      <fes:Literal>1</fes:Literal>
   </fes:PropertyIsEqualTo>
</fes:Filter>"#;
    let err = parse_filter(xml).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Model(FilterError::InvalidExpression { ref element }) if element == "Not"
    ));
}

#[test]
fn test_undeclared_prefix_is_malformed() {
    let xml = r#"<fes:Filter><fes:PropertyIsNull/></fes:Filter>"#;
    assert!(matches!(
        parse_filter(xml).unwrap_err(),
        ParseError::MalformedDocument(_)
    ));
}

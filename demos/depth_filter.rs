use fes::{
    BinaryComparisonName, BinaryComparisonOperator, BinaryLogicOperator, BinarySpatialOperator,
    Filter, Geometry, Literal, SpatialOperatorName, UnaryLogicOperator, ValueReference,
    parse_filter, serialize_filter,
};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "fes_xml=debug");
        }
    }
    env_logger::init();

    println!("Building a depth filter (DEPTH < 30)...");
    let depth_check = BinaryComparisonOperator::new(
        BinaryComparisonName::LessThan,
        ValueReference::new("DEPTH"),
        Literal::new("30"),
    );
    let filter = Filter::predicate(depth_check.clone());

    let xml = serialize_filter(&filter)?;
    println!("✓ Serialized:\n{}\n", xml);

    let reparsed = parse_filter(&xml)?;
    assert_eq!(reparsed, filter);
    println!("✓ Parsed back to an identical filter.");

    // Restrict the same check to a bounding area.
    let area = Geometry::envelope((13.0983, 31.5899), (35.5472, 42.8143));
    println!(
        "\nAdding a spatial constraint over {}...",
        area.to_wkt().unwrap_or_else(|| "<unnamed area>".into())
    );
    let outside_area = UnaryLogicOperator::not(BinarySpatialOperator::new(
        SpatialOperatorName::Disjoint,
        ValueReference::new("Geometry"),
        area,
    ));
    let bounded = Filter::predicate(BinaryLogicOperator::and(depth_check, outside_area));

    let xml = serialize_filter(&bounded)?;
    println!("✓ Serialized:\n{}\n", xml);

    let reparsed = parse_filter(&xml)?;
    assert_eq!(reparsed, bounded);
    println!("✓ Parsed back to an identical filter.");

    Ok(())
}

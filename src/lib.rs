//! # fes
//!
//! OGC Filter Encoding 2.0 for Rust.
//!
//! This crate bundles the two layers of the implementation:
//! - **fes-model**: the filter object model (expressions, operators,
//!   resource-id selections and the pluggable validator protocol)
//! - **fes-xml**: XML parsing and serialization for that model
//!
//! Filters are ordinary owned trees: build them with the record
//! constructors, or read them from a document with [`parse_filter`]. Every
//! tree the serializer can produce parses back into an equal tree.
//!
//! ```
//! use fes::{BinaryComparisonName, BinaryComparisonOperator, Filter, Literal, ValueReference};
//!
//! let filter = Filter::predicate(BinaryComparisonOperator::new(
//!     BinaryComparisonName::LessThan,
//!     ValueReference::new("DEPTH"),
//!     Literal::new("30"),
//! ));
//!
//! let xml = fes::serialize_filter(&filter)?;
//! assert_eq!(fes::parse_filter(&xml)?, filter);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export the layer crates for callers that want a qualified path.
pub use fes_model as model;
pub use fes_xml as xml;

// Re-export the object model surface
pub use fes_model::{
    BetweenComparisonOperator, BinaryComparisonName, BinaryComparisonOperator, BinaryLogicOperator,
    BinaryLogicType, BinarySpatialOperator, BinaryTemporalOperator, Candidate, DistanceOperator,
    DistanceOperatorName, Expression, Filter, FilterError, Function, GML2_NAMESPACE,
    GML32_NAMESPACE, Geometry, GmlContent, GmlElement, LikeOperator, Literal, LiteralKind,
    LiteralValue, MatchAction, MaxLength, Measure, NilOperator, NotEmpty, NullOperator, Operand,
    Operator, ResourceId, SpatialOperatorName, TemporalOperatorName, UnaryLogicOperator,
    UnaryLogicType, ValidationError, Validator, ValueReference, is_gml_namespace,
};

// Re-export the XML surface
pub use fes_xml::{
    FES_NAMESPACE, ParseError, SerializeError, XS_NAMESPACE, parse_filter, parse_filter_document,
    serialize_filter, write_filter,
};

//! Object model for OGC Filter Encoding 2.0.
//!
//! A filter is a tree of typed nodes: expressions (literals, value
//! references, functions) combined by comparison, logic, spatial and temporal
//! operators under a single `Filter` root. Construction and mutation validate
//! eagerly; a value that any attached validator rejects is never stored, so
//! an existing tree is always consistent with its validators.
//!
//! This crate knows nothing about XML. Parsing and serialization live in the
//! companion `fes-xml` crate.

pub mod error;
pub mod expression;
pub mod filter;
pub mod geometry;
pub mod operators;
pub mod validators;

pub use error::{FilterError, ValidationError};
pub use expression::{Expression, Function, Literal, LiteralKind, LiteralValue, ValueReference};
pub use filter::Filter;
pub use geometry::{
    GML2_NAMESPACE, GML32_NAMESPACE, Geometry, GmlContent, GmlElement, is_gml_namespace,
};
pub use operators::{
    BetweenComparisonOperator, BinaryComparisonName, BinaryComparisonOperator, BinaryLogicOperator,
    BinaryLogicType, BinarySpatialOperator, BinaryTemporalOperator, DistanceOperator,
    DistanceOperatorName, LikeOperator, MatchAction, Measure, NilOperator, NullOperator, Operand,
    Operator, ResourceId, SpatialOperatorName, TemporalOperatorName, UnaryLogicOperator,
    UnaryLogicType,
};
pub use validators::{Candidate, MaxLength, NotEmpty, Validator};

//! Predicate operators: comparison, logic, spatial, temporal and identifier
//! forms.
//!
//! Each operator kind is a closed enum with a bidirectional mapping to its
//! element name, and each operator record owns its operands outright. Operand
//! order is structural: swapping the operands of a binary operator yields a
//! different value.

use std::fmt;

use crate::expression::{Expression, Function, Literal, ValueReference};
use crate::geometry::Geometry;

// --- Kind enums ---

/// The six binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryComparisonName {
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
}

impl BinaryComparisonName {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PropertyIsEqualTo" => Some(Self::EqualTo),
            "PropertyIsNotEqualTo" => Some(Self::NotEqualTo),
            "PropertyIsLessThan" => Some(Self::LessThan),
            "PropertyIsGreaterThan" => Some(Self::GreaterThan),
            "PropertyIsLessThanOrEqualTo" => Some(Self::LessThanOrEqualTo),
            "PropertyIsGreaterThanOrEqualTo" => Some(Self::GreaterThanOrEqualTo),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::EqualTo => "PropertyIsEqualTo",
            Self::NotEqualTo => "PropertyIsNotEqualTo",
            Self::LessThan => "PropertyIsLessThan",
            Self::GreaterThan => "PropertyIsGreaterThan",
            Self::LessThanOrEqualTo => "PropertyIsLessThanOrEqualTo",
            Self::GreaterThanOrEqualTo => "PropertyIsGreaterThanOrEqualTo",
        }
    }
}

impl fmt::Display for BinaryComparisonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The binary logic connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLogicType {
    And,
    Or,
}

impl BinaryLogicType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "And" => Some(Self::And),
            "Or" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

impl fmt::Display for BinaryLogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The unary logic connective. A one-variant enum keeps negation symmetrical
/// with the binary connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryLogicType {
    Not,
}

impl UnaryLogicType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Not" => Some(Self::Not),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        "Not"
    }
}

impl fmt::Display for UnaryLogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Spatial relation operators taking a geometry second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialOperatorName {
    Bbox,
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
}

impl SpatialOperatorName {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BBOX" => Some(Self::Bbox),
            "Equals" => Some(Self::Equals),
            "Disjoint" => Some(Self::Disjoint),
            "Intersects" => Some(Self::Intersects),
            "Touches" => Some(Self::Touches),
            "Crosses" => Some(Self::Crosses),
            "Within" => Some(Self::Within),
            "Contains" => Some(Self::Contains),
            "Overlaps" => Some(Self::Overlaps),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Bbox => "BBOX",
            Self::Equals => "Equals",
            Self::Disjoint => "Disjoint",
            Self::Intersects => "Intersects",
            Self::Touches => "Touches",
            Self::Crosses => "Crosses",
            Self::Within => "Within",
            Self::Contains => "Contains",
            Self::Overlaps => "Overlaps",
        }
    }
}

impl fmt::Display for SpatialOperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Spatial operators qualified by a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceOperatorName {
    DWithin,
    Beyond,
}

impl DistanceOperatorName {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "DWithin" => Some(Self::DWithin),
            "Beyond" => Some(Self::Beyond),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::DWithin => "DWithin",
            Self::Beyond => "Beyond",
        }
    }
}

impl fmt::Display for DistanceOperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The fourteen temporal relation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalOperatorName {
    After,
    Before,
    Begins,
    BegunBy,
    TContains,
    During,
    TEquals,
    TOverlaps,
    Meets,
    OverlappedBy,
    MetBy,
    Ends,
    EndedBy,
    AnyInteracts,
}

impl TemporalOperatorName {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "After" => Some(Self::After),
            "Before" => Some(Self::Before),
            "Begins" => Some(Self::Begins),
            "BegunBy" => Some(Self::BegunBy),
            "TContains" => Some(Self::TContains),
            "During" => Some(Self::During),
            "TEquals" => Some(Self::TEquals),
            "TOverlaps" => Some(Self::TOverlaps),
            "Meets" => Some(Self::Meets),
            "OverlappedBy" => Some(Self::OverlappedBy),
            "MetBy" => Some(Self::MetBy),
            "Ends" => Some(Self::Ends),
            "EndedBy" => Some(Self::EndedBy),
            "AnyInteracts" => Some(Self::AnyInteracts),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::After => "After",
            Self::Before => "Before",
            Self::Begins => "Begins",
            Self::BegunBy => "BegunBy",
            Self::TContains => "TContains",
            Self::During => "During",
            Self::TEquals => "TEquals",
            Self::TOverlaps => "TOverlaps",
            Self::Meets => "Meets",
            Self::OverlappedBy => "OverlappedBy",
            Self::MetBy => "MetBy",
            Self::Ends => "Ends",
            Self::EndedBy => "EndedBy",
            Self::AnyInteracts => "AnyInteracts",
        }
    }
}

impl fmt::Display for TemporalOperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// How a comparison treats multi-valued properties (`matchAction`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchAction {
    All,
    #[default]
    Any,
    One,
}

impl MatchAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "All" => Some(Self::All),
            "Any" => Some(Self::Any),
            "One" => Some(Self::One),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Any => "Any",
            Self::One => "One",
        }
    }
}

// --- Operator records ---

/// A two-operand comparison such as `PropertyIsEqualTo`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryComparisonOperator {
    pub name: BinaryComparisonName,
    pub first_expression: Expression,
    pub second_expression: Expression,
    pub match_case: bool,
    pub match_action: MatchAction,
}

impl BinaryComparisonOperator {
    pub fn new(
        name: BinaryComparisonName,
        first_expression: impl Into<Expression>,
        second_expression: impl Into<Expression>,
    ) -> Self {
        Self {
            name,
            first_expression: first_expression.into(),
            second_expression: second_expression.into(),
            match_case: true,
            match_action: MatchAction::default(),
        }
    }

    pub fn with_match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    pub fn with_match_action(mut self, match_action: MatchAction) -> Self {
        self.match_action = match_action;
        self
    }
}

/// `PropertyIsLike`: pattern matching with caller-declared wildcard,
/// single-character and escape markers.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeOperator {
    pub first_expression: Expression,
    pub second_expression: Expression,
    pub wild_card: String,
    pub single_char: String,
    pub escape_char: String,
}

impl LikeOperator {
    pub fn new(
        first_expression: impl Into<Expression>,
        second_expression: impl Into<Expression>,
        wild_card: impl Into<String>,
        single_char: impl Into<String>,
        escape_char: impl Into<String>,
    ) -> Self {
        Self {
            first_expression: first_expression.into(),
            second_expression: second_expression.into(),
            wild_card: wild_card.into(),
            single_char: single_char.into(),
            escape_char: escape_char.into(),
        }
    }
}

/// `PropertyIsBetween`: a closed range test.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenComparisonOperator {
    pub expression: Expression,
    pub lower_boundary: Expression,
    pub upper_boundary: Expression,
}

impl BetweenComparisonOperator {
    pub fn new(
        expression: impl Into<Expression>,
        lower_boundary: impl Into<Expression>,
        upper_boundary: impl Into<Expression>,
    ) -> Self {
        Self {
            expression: expression.into(),
            lower_boundary: lower_boundary.into(),
            upper_boundary: upper_boundary.into(),
        }
    }
}

/// `PropertyIsNull`: tests that the property has no value at all.
#[derive(Debug, Clone, PartialEq)]
pub struct NullOperator {
    pub expression: Expression,
}

impl NullOperator {
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
        }
    }
}

/// `PropertyIsNil`: tests for an explicitly nil value, optionally qualified
/// by a reason.
#[derive(Debug, Clone, PartialEq)]
pub struct NilOperator {
    pub expression: Expression,
    pub nil_reason: Option<String>,
}

impl NilOperator {
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            nil_reason: None,
        }
    }

    pub fn with_nil_reason(mut self, nil_reason: impl Into<String>) -> Self {
        self.nil_reason = Some(nil_reason.into());
        self
    }
}

/// `And`/`Or` over exactly two operands, each an operator or an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLogicOperator {
    pub kind: BinaryLogicType,
    pub first_operand: Operand,
    pub second_operand: Operand,
}

impl BinaryLogicOperator {
    pub fn new(
        kind: BinaryLogicType,
        first_operand: impl Into<Operand>,
        second_operand: impl Into<Operand>,
    ) -> Self {
        Self {
            kind,
            first_operand: first_operand.into(),
            second_operand: second_operand.into(),
        }
    }

    pub fn and(first_operand: impl Into<Operand>, second_operand: impl Into<Operand>) -> Self {
        Self::new(BinaryLogicType::And, first_operand, second_operand)
    }

    pub fn or(first_operand: impl Into<Operand>, second_operand: impl Into<Operand>) -> Self {
        Self::new(BinaryLogicType::Or, first_operand, second_operand)
    }
}

/// `Not` over exactly one predicate. The operand is an operator, never a bare
/// expression; the type rules out negating a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryLogicOperator {
    pub kind: UnaryLogicType,
    pub operand: Box<Operator>,
}

impl UnaryLogicOperator {
    pub fn new(kind: UnaryLogicType, operand: impl Into<Operator>) -> Self {
        Self {
            kind,
            operand: Box::new(operand.into()),
        }
    }

    pub fn not(operand: impl Into<Operator>) -> Self {
        Self::new(UnaryLogicType::Not, operand)
    }
}

/// A spatial relation between a property and a geometry payload. The payload
/// is required: a spatial test without a geometry is not representable.
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySpatialOperator {
    pub name: SpatialOperatorName,
    pub first_operand: Expression,
    pub second_operand: Geometry,
}

impl BinarySpatialOperator {
    pub fn new(
        name: SpatialOperatorName,
        first_operand: impl Into<Expression>,
        second_operand: Geometry,
    ) -> Self {
        Self {
            name,
            first_operand: first_operand.into(),
            second_operand,
        }
    }
}

/// A length with its unit of measure, as carried by `fes:Distance`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub value: f64,
    pub uom: String,
}

impl Measure {
    pub fn new(value: f64, uom: impl Into<String>) -> Self {
        Self {
            value,
            uom: uom.into(),
        }
    }
}

/// `DWithin`/`Beyond`: a spatial relation qualified by a distance.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceOperator {
    pub name: DistanceOperatorName,
    pub first_operand: Expression,
    pub second_operand: Geometry,
    pub distance: Measure,
}

impl DistanceOperator {
    pub fn new(
        name: DistanceOperatorName,
        first_operand: impl Into<Expression>,
        second_operand: Geometry,
        distance: Measure,
    ) -> Self {
        Self {
            name,
            first_operand: first_operand.into(),
            second_operand,
            distance,
        }
    }
}

/// A temporal relation between two expressions. The second expression usually
/// carries a time instant or period, either as text or as a captured GML
/// payload literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryTemporalOperator {
    pub name: TemporalOperatorName,
    pub first_expression: Expression,
    pub second_expression: Expression,
}

impl BinaryTemporalOperator {
    pub fn new(
        name: TemporalOperatorName,
        first_expression: impl Into<Expression>,
        second_expression: impl Into<Expression>,
    ) -> Self {
        Self {
            name,
            first_expression: first_expression.into(),
            second_expression: second_expression.into(),
        }
    }
}

/// A selection of one resource by identifier, with the optional versioning
/// attributes of the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub rid: String,
    pub previous_rid: Option<String>,
    pub version: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ResourceId {
    pub fn new(rid: impl Into<String>) -> Self {
        Self {
            rid: rid.into(),
            previous_rid: None,
            version: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_previous_rid(mut self, previous_rid: impl Into<String>) -> Self {
        self.previous_rid = Some(previous_rid.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }
}

// --- Sums ---

/// Any predicate form a filter can hold. Closed, like the expression sum.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Comparison(BinaryComparisonOperator),
    Like(LikeOperator),
    Between(BetweenComparisonOperator),
    Null(NullOperator),
    Nil(NilOperator),
    BinaryLogic(BinaryLogicOperator),
    UnaryLogic(UnaryLogicOperator),
    Spatial(BinarySpatialOperator),
    Distance(DistanceOperator),
    Temporal(BinaryTemporalOperator),
}

impl Operator {
    /// The element name this operator serializes under.
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Comparison(operator) => operator.name.tag(),
            Operator::Like(_) => "PropertyIsLike",
            Operator::Between(_) => "PropertyIsBetween",
            Operator::Null(_) => "PropertyIsNull",
            Operator::Nil(_) => "PropertyIsNil",
            Operator::BinaryLogic(operator) => operator.kind.tag(),
            Operator::UnaryLogic(operator) => operator.kind.tag(),
            Operator::Spatial(operator) => operator.name.tag(),
            Operator::Distance(operator) => operator.name.tag(),
            Operator::Temporal(operator) => operator.name.tag(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl From<BinaryComparisonOperator> for Operator {
    fn from(operator: BinaryComparisonOperator) -> Self {
        Operator::Comparison(operator)
    }
}

impl From<LikeOperator> for Operator {
    fn from(operator: LikeOperator) -> Self {
        Operator::Like(operator)
    }
}

impl From<BetweenComparisonOperator> for Operator {
    fn from(operator: BetweenComparisonOperator) -> Self {
        Operator::Between(operator)
    }
}

impl From<NullOperator> for Operator {
    fn from(operator: NullOperator) -> Self {
        Operator::Null(operator)
    }
}

impl From<NilOperator> for Operator {
    fn from(operator: NilOperator) -> Self {
        Operator::Nil(operator)
    }
}

impl From<BinaryLogicOperator> for Operator {
    fn from(operator: BinaryLogicOperator) -> Self {
        Operator::BinaryLogic(operator)
    }
}

impl From<UnaryLogicOperator> for Operator {
    fn from(operator: UnaryLogicOperator) -> Self {
        Operator::UnaryLogic(operator)
    }
}

impl From<BinarySpatialOperator> for Operator {
    fn from(operator: BinarySpatialOperator) -> Self {
        Operator::Spatial(operator)
    }
}

impl From<DistanceOperator> for Operator {
    fn from(operator: DistanceOperator) -> Self {
        Operator::Distance(operator)
    }
}

impl From<BinaryTemporalOperator> for Operator {
    fn from(operator: BinaryTemporalOperator) -> Self {
        Operator::Temporal(operator)
    }
}

/// A logic-operator (or filter) operand slot: either a nested predicate or a
/// bare expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Operator(Box<Operator>),
    Expression(Expression),
}

impl Operand {
    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Operand::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Operand::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

impl From<Operator> for Operand {
    fn from(operator: Operator) -> Self {
        Operand::Operator(Box::new(operator))
    }
}

impl From<Expression> for Operand {
    fn from(expression: Expression) -> Self {
        Operand::Expression(expression)
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Operand::Expression(Expression::Literal(literal))
    }
}

impl From<ValueReference> for Operand {
    fn from(reference: ValueReference) -> Self {
        Operand::Expression(Expression::ValueReference(reference))
    }
}

impl From<Function> for Operand {
    fn from(function: Function) -> Self {
        Operand::Expression(Expression::Function(function))
    }
}

impl From<BinaryComparisonOperator> for Operand {
    fn from(operator: BinaryComparisonOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<LikeOperator> for Operand {
    fn from(operator: LikeOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<BetweenComparisonOperator> for Operand {
    fn from(operator: BetweenComparisonOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<NullOperator> for Operand {
    fn from(operator: NullOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<NilOperator> for Operand {
    fn from(operator: NilOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<BinaryLogicOperator> for Operand {
    fn from(operator: BinaryLogicOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<UnaryLogicOperator> for Operand {
    fn from(operator: UnaryLogicOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<BinarySpatialOperator> for Operand {
    fn from(operator: BinarySpatialOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<DistanceOperator> for Operand {
    fn from(operator: DistanceOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

impl From<BinaryTemporalOperator> for Operand {
    fn from(operator: BinaryTemporalOperator) -> Self {
        Operand::from(Operator::from(operator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GmlElement;

    #[test]
    fn test_comparison_tags_round_trip() {
        let names = [
            BinaryComparisonName::EqualTo,
            BinaryComparisonName::NotEqualTo,
            BinaryComparisonName::LessThan,
            BinaryComparisonName::GreaterThan,
            BinaryComparisonName::LessThanOrEqualTo,
            BinaryComparisonName::GreaterThanOrEqualTo,
        ];
        for name in names {
            assert_eq!(BinaryComparisonName::from_tag(name.tag()), Some(name));
        }
        assert_eq!(BinaryComparisonName::from_tag("PropertyIsWeird"), None);
    }

    #[test]
    fn test_spatial_and_temporal_tags_round_trip() {
        let spatial = [
            SpatialOperatorName::Bbox,
            SpatialOperatorName::Equals,
            SpatialOperatorName::Disjoint,
            SpatialOperatorName::Intersects,
            SpatialOperatorName::Touches,
            SpatialOperatorName::Crosses,
            SpatialOperatorName::Within,
            SpatialOperatorName::Contains,
            SpatialOperatorName::Overlaps,
        ];
        for name in spatial {
            assert_eq!(SpatialOperatorName::from_tag(name.tag()), Some(name));
        }
        assert_eq!(SpatialOperatorName::Bbox.tag(), "BBOX");

        let temporal = [
            TemporalOperatorName::After,
            TemporalOperatorName::Before,
            TemporalOperatorName::Begins,
            TemporalOperatorName::BegunBy,
            TemporalOperatorName::TContains,
            TemporalOperatorName::During,
            TemporalOperatorName::TEquals,
            TemporalOperatorName::TOverlaps,
            TemporalOperatorName::Meets,
            TemporalOperatorName::OverlappedBy,
            TemporalOperatorName::MetBy,
            TemporalOperatorName::Ends,
            TemporalOperatorName::EndedBy,
            TemporalOperatorName::AnyInteracts,
        ];
        for name in temporal {
            assert_eq!(TemporalOperatorName::from_tag(name.tag()), Some(name));
        }
    }

    #[test]
    fn test_comparison_defaults() {
        let comparison = BinaryComparisonOperator::new(
            BinaryComparisonName::EqualTo,
            ValueReference::new("SomeProperty"),
            Literal::new("100"),
        );
        assert!(comparison.match_case);
        assert_eq!(comparison.match_action, MatchAction::Any);

        let relaxed = comparison
            .clone()
            .with_match_case(false)
            .with_match_action(MatchAction::All);
        assert!(!relaxed.match_case);
        assert_eq!(relaxed.match_action, MatchAction::All);
        assert_ne!(comparison, relaxed);
    }

    #[test]
    fn test_operator_tags() {
        let depth_check: Operator = BinaryComparisonOperator::new(
            BinaryComparisonName::LessThan,
            ValueReference::new("DEPTH"),
            Literal::new("30"),
        )
        .into();
        assert_eq!(depth_check.tag(), "PropertyIsLessThan");

        let negated: Operator = UnaryLogicOperator::not(depth_check.clone()).into();
        assert_eq!(negated.tag(), "Not");
        assert_eq!(negated.to_string(), "Not");

        let both: Operator = BinaryLogicOperator::and(
            depth_check.clone(),
            NullOperator::new(ValueReference::new("NAME")),
        )
        .into();
        assert_eq!(both.tag(), "And");

        let nearby: Operator = DistanceOperator::new(
            DistanceOperatorName::DWithin,
            ValueReference::new("Geometry"),
            Geometry::new(GmlElement::new("Point").with_text("1 2")),
            Measure::new(10.0, "m"),
        )
        .into();
        assert_eq!(nearby.tag(), "DWithin");
    }

    #[test]
    fn test_logic_operands_are_order_sensitive() {
        let first = NullOperator::new(ValueReference::new("A"));
        let second = NullOperator::new(ValueReference::new("B"));
        let forward = BinaryLogicOperator::and(first.clone(), second.clone());
        let reversed = BinaryLogicOperator::and(second, first);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_logic_operand_accepts_bare_expression() {
        let mixed = BinaryLogicOperator::or(
            NullOperator::new(ValueReference::new("A")),
            ValueReference::new("flag"),
        );
        assert!(mixed.first_operand.as_operator().is_some());
        assert!(mixed.second_operand.as_expression().is_some());
    }

    #[test]
    fn test_match_action_names() {
        assert_eq!(MatchAction::from_name("One"), Some(MatchAction::One));
        assert_eq!(MatchAction::from_name("one"), None);
        assert_eq!(MatchAction::default().name(), "Any");
    }

    #[test]
    fn test_resource_id_equality_covers_all_fields() {
        let plain = ResourceId::new("apts.1");
        let versioned = ResourceId::new("apts.1").with_version("3");
        assert_ne!(plain, versioned);
        assert_eq!(versioned, ResourceId::new("apts.1").with_version("3"));
    }
}

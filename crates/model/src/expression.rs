//! Expression nodes: literals, value references and functions.
//!
//! Expressions are the leaves and near-leaves of a filter tree. Every node
//! carries its own validator list; setters validate the candidate first and
//! store only on acceptance, so a rejected assignment leaves the node exactly
//! as it was.

use std::fmt;
use std::sync::Arc;

use crate::error::{FilterError, ValidationError};
use crate::geometry::Geometry;
use crate::validators::{Candidate, Validator, run_validators};

// --- Literal values ---

/// Type tag for a literal payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Integer,
    Double,
    Boolean,
    Geometry,
}

/// The payload of a literal. The kind tag is implied by the variant, so a
/// value and its reported kind can never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Geometry(Geometry),
}

impl LiteralValue {
    pub fn kind(&self) -> LiteralKind {
        match self {
            LiteralValue::String(_) => LiteralKind::String,
            LiteralValue::Integer(_) => LiteralKind::Integer,
            LiteralValue::Double(_) => LiteralKind::Double,
            LiteralValue::Boolean(_) => LiteralKind::Boolean,
            LiteralValue::Geometry(_) => LiteralKind::Geometry,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            LiteralValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            LiteralValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            LiteralValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            LiteralValue::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(value) => write!(f, "{}", value),
            LiteralValue::Integer(value) => write!(f, "{}", value),
            LiteralValue::Double(value) => write!(f, "{}", value),
            LiteralValue::Boolean(value) => write!(f, "{}", value),
            LiteralValue::Geometry(geometry) => match geometry.to_wkt() {
                Some(wkt) => write!(f, "{}", wkt),
                None => write!(f, "{}", geometry.name()),
            },
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Integer(value as i64)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Double(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

impl From<Geometry> for LiteralValue {
    fn from(value: Geometry) -> Self {
        LiteralValue::Geometry(value)
    }
}

// --- Literal ---

/// A constant operand. Equality is payload equality; validator lists do not
/// participate.
#[derive(Debug, Clone)]
pub struct Literal {
    value: LiteralValue,
    validators: Vec<Arc<dyn Validator>>,
}

impl Literal {
    pub fn new(value: impl Into<LiteralValue>) -> Self {
        Self {
            value: value.into(),
            validators: Vec::new(),
        }
    }

    /// Attaches validators, running them against the current value. A
    /// rejection means no node is produced at all.
    pub fn with_validators(
        mut self,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Result<Self, ValidationError> {
        run_validators(&validators, Candidate::Value(&self.value))?;
        self.validators = validators;
        Ok(self)
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    pub fn kind(&self) -> LiteralKind {
        self.value.kind()
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Replaces the payload. The candidate is validated before the store, so
    /// a rejection leaves the previous value in place.
    pub fn set_value(&mut self, value: impl Into<LiteralValue>) -> Result<(), ValidationError> {
        let value = value.into();
        run_validators(&self.validators, Candidate::Value(&value))?;
        self.value = value;
        Ok(())
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// --- ValueReference ---

/// An XPath-style reference to a property of the queried resource. The path
/// is coerced to a string before any validator sees it, so validators always
/// observe the stored form.
#[derive(Debug, Clone)]
pub struct ValueReference {
    value: String,
    validators: Vec<Arc<dyn Validator>>,
}

impl ValueReference {
    pub fn new(value: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            validators: Vec::new(),
        }
    }

    pub fn with_validators(
        mut self,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Result<Self, ValidationError> {
        run_validators(&validators, Candidate::Name(&self.value))?;
        self.validators = validators;
        Ok(self)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn set_value(&mut self, value: impl ToString) -> Result<(), ValidationError> {
        let value = value.to_string();
        run_validators(&self.validators, Candidate::Name(&value))?;
        self.value = value;
        Ok(())
    }
}

impl PartialEq for ValueReference {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for ValueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// --- Function ---

/// A named function applied to expression arguments.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    arguments: Vec<Expression>,
    validators: Vec<Arc<dyn Validator>>,
}

impl Function {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            arguments,
            validators: Vec::new(),
        }
    }

    /// Attaches validators, checking the name and every current argument.
    pub fn with_validators(
        mut self,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Result<Self, ValidationError> {
        run_validators(&validators, Candidate::Name(&self.name))?;
        for argument in &self.arguments {
            run_validators(&validators, Candidate::Argument(argument))?;
        }
        self.validators = validators;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        run_validators(&self.validators, Candidate::Name(&name))?;
        self.name = name;
        Ok(())
    }

    /// Replaces the argument list. Every candidate is validated before any of
    /// them is installed; one rejection leaves the current list untouched.
    pub fn set_arguments(&mut self, arguments: Vec<Expression>) -> Result<(), ValidationError> {
        for argument in &arguments {
            run_validators(&self.validators, Candidate::Argument(argument))?;
        }
        self.arguments = arguments;
        Ok(())
    }

    /// Appends one argument. No validator runs here: the argument is already
    /// a typed expression, which is the only property appending must uphold.
    pub fn add_argument(&mut self, argument: impl Into<Expression>) {
        self.arguments.push(argument.into());
    }

    /// Removes and returns the first argument equal to `argument`.
    pub fn remove_argument(&mut self, argument: &Expression) -> Result<Expression, FilterError> {
        match self.arguments.iter().position(|existing| existing == argument) {
            Some(index) => Ok(self.arguments.remove(index)),
            None => Err(FilterError::ArgumentNotFound {
                function: self.name.clone(),
            }),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arguments == other.arguments
    }
}

// --- Expression sum ---

/// Any node usable in an operand or argument position. The set is closed:
/// everything that can appear where an expression is expected is one of these
/// three, checked at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    ValueReference(ValueReference),
    Function(Function),
}

impl Expression {
    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }

    pub fn is_value_reference(&self) -> bool {
        matches!(self, Expression::ValueReference(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expression::Function(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_value_reference(&self) -> Option<&ValueReference> {
        match self {
            Expression::ValueReference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Expression::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<ValueReference> for Expression {
    fn from(reference: ValueReference) -> Self {
        Expression::ValueReference(reference)
    }
}

impl From<Function> for Expression {
    fn from(function: Function) -> Self {
        Expression::Function(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{MaxLength, NotEmpty};

    #[test]
    fn test_literal_kind_follows_value() {
        assert_eq!(Literal::new("100").kind(), LiteralKind::String);
        assert_eq!(Literal::new(100).kind(), LiteralKind::Integer);
        assert_eq!(Literal::new(1.5).kind(), LiteralKind::Double);
        assert_eq!(Literal::new(true).kind(), LiteralKind::Boolean);
    }

    #[test]
    fn test_literal_equality_ignores_validators() {
        let plain = Literal::new("depth");
        let guarded = Literal::new("depth")
            .with_validators(vec![Arc::new(NotEmpty)])
            .unwrap();
        assert_eq!(plain, guarded);
    }

    #[test]
    fn test_rejected_construction_produces_no_node() {
        let result = Literal::new("").with_validators(vec![Arc::new(NotEmpty)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejected_set_value_keeps_previous_value() {
        let mut literal = Literal::new("initial")
            .with_validators(vec![Arc::new(NotEmpty)])
            .unwrap();
        assert!(literal.set_value("").is_err());
        assert_eq!(literal.value().as_str(), Some("initial"));

        literal.set_value("replaced").unwrap();
        assert_eq!(literal.value().as_str(), Some("replaced"));
    }

    #[test]
    fn test_value_reference_coerces_before_validation() {
        // The numeric input becomes "42" before MaxLength counts characters.
        let reference = ValueReference::new(42)
            .with_validators(vec![Arc::new(MaxLength(2))])
            .unwrap();
        assert_eq!(reference.value(), "42");

        let mut reference = reference;
        assert!(reference.set_value(12345).is_err());
        assert_eq!(reference.value(), "42");
    }

    #[test]
    fn test_set_arguments_is_atomic() {
        let mut function = Function::new("nearest", vec![])
            .with_validators(vec![Arc::new(NotEmpty)])
            .unwrap();
        function
            .set_arguments(vec![ValueReference::new("depth").into()])
            .unwrap();

        let result = function.set_arguments(vec![
            ValueReference::new("location").into(),
            Literal::new("").into(),
        ]);
        assert!(result.is_err());
        assert_eq!(
            function.arguments(),
            &[Expression::ValueReference(ValueReference::new("depth"))]
        );
    }

    #[test]
    fn test_add_argument_skips_validators() {
        let mut function = Function::new("nearest", vec![])
            .with_validators(vec![Arc::new(NotEmpty)])
            .unwrap();
        // An empty literal would fail set_arguments, but appending only
        // requires the argument to be an expression.
        function.add_argument(Literal::new(""));
        assert_eq!(function.arguments().len(), 1);
    }

    #[test]
    fn test_remove_argument_takes_first_match() {
        let mut function = Function::new(
            "max",
            vec![
                Literal::new(1).into(),
                Literal::new(2).into(),
                Literal::new(1).into(),
            ],
        );
        let removed = function.remove_argument(&Literal::new(1).into()).unwrap();
        assert_eq!(removed, Expression::Literal(Literal::new(1)));
        assert_eq!(
            function.arguments(),
            &[
                Expression::Literal(Literal::new(2)),
                Expression::Literal(Literal::new(1)),
            ]
        );

        let missing = function.remove_argument(&Literal::new(9).into());
        assert!(matches!(
            missing,
            Err(FilterError::ArgumentNotFound { .. })
        ));
        assert_eq!(function.arguments().len(), 2);
    }

    #[test]
    fn test_function_equality_is_name_and_order_sensitive() {
        let a: Expression = ValueReference::new("A").into();
        let b: Expression = Literal::new("B").into();
        let forward = Function::new("f", vec![a.clone(), b.clone()]);
        assert_eq!(forward, Function::new("f", vec![a.clone(), b.clone()]));
        assert_ne!(forward, Function::new("f", vec![b.clone(), a.clone()]));
        assert_ne!(forward, Function::new("g", vec![a, b]));
    }

    #[test]
    fn test_cross_variant_equality_is_false() {
        let literal: Expression = Literal::new("depth").into();
        let reference: Expression = ValueReference::new("depth").into();
        assert_ne!(literal, reference);
    }

    #[test]
    fn test_literal_display_matches_lexical_form() {
        assert_eq!(Literal::new("abc").to_string(), "abc");
        assert_eq!(Literal::new(30).to_string(), "30");
        assert_eq!(Literal::new(2.5).to_string(), "2.5");
        assert_eq!(Literal::new(false).to_string(), "false");
    }
}

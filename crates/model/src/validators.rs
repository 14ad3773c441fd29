//! The pluggable validation protocol applied on every value assignment.
//!
//! Nodes hold an ordered list of validators; each assignment (construction
//! included) presents the candidate to every validator in order, and the new
//! value is only stored once all of them accept. Validators must be pure with
//! respect to node state.

use crate::error::ValidationError;
use crate::expression::{Expression, LiteralValue};
use std::fmt;
use std::sync::Arc;

/// A borrowed view of the value a node is about to store.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A literal payload being assigned to a `Literal`.
    Value(&'a LiteralValue),
    /// A value-reference path or function name, already coerced to a string.
    Name(&'a str),
    /// An expression being installed as a function argument.
    Argument(&'a Expression),
}

impl Candidate<'_> {
    /// The string content of the candidate, when it has one. Argument
    /// candidates expose the text of the expression they wrap, so a validator
    /// written for literal values also covers arguments.
    pub fn text(&self) -> Option<&str> {
        match self {
            Candidate::Value(value) => value.as_str(),
            Candidate::Name(name) => Some(name),
            Candidate::Argument(Expression::Literal(literal)) => literal.value().as_str(),
            Candidate::Argument(Expression::ValueReference(reference)) => Some(reference.value()),
            Candidate::Argument(Expression::Function(_)) => None,
        }
    }
}

/// A single check applied to candidate values before they are stored.
pub trait Validator: fmt::Debug + Send + Sync {
    fn validate(&self, candidate: Candidate<'_>) -> Result<(), ValidationError>;
}

/// Runs every validator in order; the first rejection wins.
pub(crate) fn run_validators(
    validators: &[Arc<dyn Validator>],
    candidate: Candidate<'_>,
) -> Result<(), ValidationError> {
    for validator in validators {
        validator.validate(candidate)?;
    }
    Ok(())
}

/// Rejects empty (or whitespace-only) names and string values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl Validator for NotEmpty {
    fn validate(&self, candidate: Candidate<'_>) -> Result<(), ValidationError> {
        match candidate.text() {
            Some(text) if text.trim().is_empty() => {
                Err(ValidationError::new("value must not be empty"))
            }
            _ => Ok(()),
        }
    }
}

/// Rejects names and string values longer than a fixed number of characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Validator for MaxLength {
    fn validate(&self, candidate: Candidate<'_>) -> Result<(), ValidationError> {
        match candidate.text() {
            Some(text) if text.chars().count() > self.0 => Err(ValidationError::new(format!(
                "value exceeds the maximum length of {} characters",
                self.0
            ))),
            _ => Ok(()),
        }
    }
}

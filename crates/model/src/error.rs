use thiserror::Error;

/// A validator rejected a candidate value. The assignment that triggered the
/// check is abandoned and the node keeps its previous state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {reason}")]
pub struct ValidationError {
    reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors raised while building or mutating the filter object model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("<{element}> cannot be used as an expression")]
    InvalidExpression { element: String },

    #[error("function '{function}' has no matching argument to remove")]
    ArgumentNotFound { function: String },

    #[error("a resource id selection needs at least one id")]
    EmptyIdSelection,
}

//! The filter root: one predicate tree, or a resource-id selection.

use crate::error::FilterError;
use crate::operators::{Operand, ResourceId};

/// A complete filter. The two forms are mutually exclusive by construction:
/// a filter either holds exactly one predicate (or bare expression) or a
/// non-empty, ordered list of resource ids, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Predicate(Operand),
    ResourceIds(Vec<ResourceId>),
}

impl Filter {
    /// Wraps a predicate operator or expression as a filter.
    pub fn predicate(operand: impl Into<Operand>) -> Self {
        Filter::Predicate(operand.into())
    }

    /// Builds an id-selection filter. At least one id is required.
    pub fn matching_ids(ids: Vec<ResourceId>) -> Result<Self, FilterError> {
        if ids.is_empty() {
            return Err(FilterError::EmptyIdSelection);
        }
        Ok(Filter::ResourceIds(ids))
    }

    pub fn as_predicate(&self) -> Option<&Operand> {
        match self {
            Filter::Predicate(operand) => Some(operand),
            _ => None,
        }
    }

    pub fn resource_ids(&self) -> Option<&[ResourceId]> {
        match self {
            Filter::ResourceIds(ids) => Some(ids),
            _ => None,
        }
    }
}

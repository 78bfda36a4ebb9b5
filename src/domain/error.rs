//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::{NodeId, Refusal};

/// Domain errors represent malformed input and broken preconditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unbalanced brackets in edge list: {0}")]
    UnbalancedBrackets(String),

    #[error("malformed edge '[{0}]': expected '[parent,child]'")]
    MalformedEdge(String),

    #[error("invalid node id '{0}'")]
    InvalidNodeId(String),

    #[error("edge list has no root: every parent is also a child")]
    NoRoot,

    #[error("edge list has several root candidates: {0:?}")]
    AmbiguousRoot(Vec<NodeId>),

    #[error("cannot transform across roots: source root {source_root}, target root {target_root}")]
    RootMismatch {
        source_root: NodeId,
        target_root: NodeId,
    },

    #[error("{0}")]
    Refused(#[from] Refusal),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

impl DomainError {
    /// Malformed textual input, as opposed to a broken precondition.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            DomainError::UnbalancedBrackets(_)
                | DomainError::MalformedEdge(_)
                | DomainError::InvalidNodeId(_)
                | DomainError::NoRoot
                | DomainError::AmbiguousRoot(_)
                | DomainError::UnknownOperation(_)
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

//! Error types returned by graph stores, graphs and algorithms.
use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors raised by graph operations.
///
/// Every error is reported to the immediate caller, and a failing mutation leaves the graph
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GraphError {
    /// The vertex is not currently present. Carries the index when the lookup was by index; label
    /// lookups that found nothing carry `None`.
    #[error("No such vertex{}", fmt_index(.0))]
    NoSuchVertex(Option<usize>),
    /// Both endpoints exist, but no connection goes from `from` to `to`.
    #[error("No such edge from {from} to {to}")]
    NoSuchEdge {
        /// Source index
        from: usize,
        /// Target index
        to: usize,
    },
    /// The label is already held by the live vertex at this index.
    #[error("Duplicate vertex: label already held by index {0}")]
    DuplicateVertex(usize),
    /// The operation cannot be applied to this graph in its current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl GraphError {
    pub(crate) fn no_such_vertex(index: usize) -> Self {
        Self::NoSuchVertex(Some(index))
    }
}

fn fmt_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

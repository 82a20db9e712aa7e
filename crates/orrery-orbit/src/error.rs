//! Body catalog error types.

/// Errors raised while loading or validating a body catalog.
///
/// Evaluation itself never fails; every structural problem in the authored
/// data is rejected here instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// A body has an empty or whitespace-only name.
    #[error("body at index {index} has an empty name")]
    EmptyName { index: usize },

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// An orbit references a parent that is not in the catalog.
    #[error("body `{body}` orbits unknown parent `{parent}`")]
    UnknownParent { body: String, parent: String },

    /// Following parents from this body never reaches a root.
    #[error("body `{0}` is caught in a parent cycle")]
    ParentCycle(String),

    /// A display color is not of the form `#rrggbb`.
    #[error("body `{body}` has invalid color `{color}` (expected #rrggbb)")]
    InvalidColor { body: String, color: String },
}

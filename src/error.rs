use thiserror::Error;

/// Errors reported by tree operations.
///
/// Every failed precondition is detected before the tree is touched, so an
/// operation that returns one of these leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError<K> {
    /// The operation requires at least one node in the tree
    #[error("operation requires a non-empty tree")]
    EmptyTree,

    /// The targeted key is not present in the tree
    #[error("key is not present in the tree")]
    KeyNotFound,

    /// The key is already present in the tree. Keys are unique, so the
    /// insertion was rejected; the key is handed back to the caller.
    #[error("key is already present in the tree")]
    DuplicateKey(K),
}

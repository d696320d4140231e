use thiserror::Error;

/// Failure of the underlying record store (connection, query, pool).
///
/// Store implementations flatten their native errors into this so the ledger
/// stays independent of any particular backend.
#[derive(Error, Debug)]
#[error("record store failure: {0}")]
pub struct StoreError(pub String);

/// The error taxonomy every ledger and workflow operation surfaces.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The referenced record does not resolve to an active entry.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The operation would push occupancy past capacity or remove a record
    /// that still has dependents.
    #[error("{0}")]
    Capacity(&'static str),
    /// A concurrent-modification guard failed; the caller may retry.
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Self::Capacity(_))
    }
}

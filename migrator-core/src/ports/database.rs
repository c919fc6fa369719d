//! Database port - the driver capability the engine consumes

use crate::domain::Result;

/// Synchronous access to the target database
///
/// The handle is owned by the caller and lent to the engine. Implementations
/// report driver failures as [`crate::Error::Store`].
pub trait Database {
    /// Execute a single statement outside of any explicit transaction.
    ///
    /// Returns the number of affected rows.
    fn execute(&self, sql: &str, params: &[&str]) -> Result<usize>;

    /// Run a query and return the first `columns` columns of every row as text.
    ///
    /// Callers cast non-text columns in SQL; NULL comes back as `None`.
    fn query(&self, sql: &str, params: &[&str], columns: usize)
        -> Result<Vec<Vec<Option<String>>>>;

    /// Open a transaction. Only one may be open per handle at a time.
    fn begin(&self) -> Result<Box<dyn DatabaseTransaction + '_>>;
}

/// An open transaction
///
/// Dropping it without calling [`commit`](Self::commit) or
/// [`rollback`](Self::rollback) rolls it back.
pub trait DatabaseTransaction {
    /// Execute one statement inside the transaction
    fn execute(&mut self, statement: &str) -> Result<()>;

    fn commit(self: Box<Self>) -> Result<()>;

    fn rollback(self: Box<Self>) -> Result<()>;
}

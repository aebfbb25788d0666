//! Projection and row-shape methods for the query builder

use crate::query::builder::QueryBuilder;
use crate::query::types::Operation;

impl QueryBuilder {
    /// Mark the query as a read and set its projection.
    ///
    /// `columns` is a comma-separated column list; `"*"` selects everything.
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.operation = Some(Operation::Select);
        self.columns = Some(columns.into());
        self
    }

    /// Ask the proxy to resolve the query to a single row
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }
}

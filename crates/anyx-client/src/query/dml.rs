//! Write methods for the query builder

use serde_json::Value;

use crate::query::builder::QueryBuilder;
use crate::query::types::Operation;

impl QueryBuilder {
    /// Mark the query as an insert.
    ///
    /// `values` may be a single JSON object or an array of objects; a single
    /// object is treated as a one-row insert. A repeated `insert` call
    /// replaces the rows recorded by the earlier one.
    pub fn insert(mut self, values: impl Into<Value>) -> Self {
        self.operation = Some(Operation::Insert);
        self.insert_rows = match values.into() {
            Value::Array(rows) => rows,
            value => vec![value],
        };
        self
    }

    /// Mark the query as an update carrying the given column assignments.
    ///
    /// The rows touched are the ones matching the builder's filters; an update
    /// with no filters touches the whole collection, so callers are expected
    /// to scope it.
    pub fn update(mut self, values: impl Into<Value>) -> Self {
        self.operation = Some(Operation::Update);
        self.update_values = Some(values.into());
        self
    }

    /// Mark the query as a delete scoped by the builder's filters
    pub fn delete(mut self) -> Self {
        self.operation = Some(Operation::Delete);
        self
    }
}

//! Pagination methods for the query builder

use crate::query::builder::QueryBuilder;

impl QueryBuilder {
    /// Cap the number of rows returned
    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Skip the first `count` rows
    pub fn offset(mut self, count: u64) -> Self {
        self.offset = Some(count);
        self
    }
}

//! Ordering methods for the query builder

use crate::query::builder::QueryBuilder;
use crate::query::types::OrderDirective;

impl QueryBuilder {
    /// Order results by `column`, ascending
    pub fn order(self, column: impl Into<String>) -> Self {
        self.push_order(column, true)
    }

    /// Order results by `column`, descending
    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.push_order(column, false)
    }

    fn push_order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(OrderDirective {
            column: column.into(),
            ascending,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_client;

    #[test]
    fn test_order_directives_keep_call_order() {
        let builder = test_client()
            .from("books")
            .order_desc("created_at")
            .order("title");

        assert_eq!(builder.order.len(), 2);
        assert_eq!(builder.order[0].column, "created_at");
        assert!(!builder.order[0].ascending);
        assert_eq!(builder.order[1].column, "title");
        assert!(builder.order[1].ascending);
    }
}

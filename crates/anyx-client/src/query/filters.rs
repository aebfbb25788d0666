//! Filter methods for the query builder

use serde_json::Value;

use crate::query::builder::QueryBuilder;
use crate::query::types::{Filter, FilterOperator};

impl QueryBuilder {
    /// Filter rows where `column` equals `value`
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Eq, value.into())
    }

    /// Filter rows where `column` does not equal `value`
    pub fn neq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Neq, value.into())
    }

    /// Filter rows where `column` is greater than `value`
    pub fn gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Gt, value.into())
    }

    /// Filter rows where `column` is greater than or equal to `value`
    pub fn gte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Gte, value.into())
    }

    /// Filter rows where `column` is less than `value`
    pub fn lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Lt, value.into())
    }

    /// Filter rows where `column` is less than or equal to `value`
    pub fn lte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_filter(column, FilterOperator::Lte, value.into())
    }

    /// Filter rows where `column` matches a case-sensitive pattern.
    ///
    /// The pattern uses `%` as the wildcard, e.g. `"The %"`.
    pub fn like(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push_filter(column, FilterOperator::Like, Value::String(pattern.into()))
    }

    /// Filter rows where `column` matches a case-insensitive pattern
    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push_filter(column, FilterOperator::Ilike, Value::String(pattern.into()))
    }

    /// Filter rows where `column` is one of `values`
    pub fn is_in<T: Into<Value>>(self, column: impl Into<String>, values: Vec<T>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push_filter(column, FilterOperator::In, Value::Array(values))
    }

    /// Filter rows where `column` is null
    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.push_filter(column, FilterOperator::Is, Value::Null)
    }

    fn push_filter(
        mut self,
        column: impl Into<String>,
        operator: FilterOperator,
        value: Value,
    ) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            operator,
            value,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use serde_json::json;

    #[test]
    fn test_filters_accumulate_in_call_order() {
        let builder = test_client()
            .from("user_books")
            .eq("user_id", "u-1")
            .gt("page_count", 100)
            .is_null("read_at");

        assert_eq!(builder.filters.len(), 3);
        assert_eq!(builder.filters[0].column, "user_id");
        assert_eq!(builder.filters[0].operator, FilterOperator::Eq);
        assert_eq!(builder.filters[1].column, "page_count");
        assert_eq!(builder.filters[1].value, json!(100));
        assert_eq!(builder.filters[2].operator, FilterOperator::Is);
        assert_eq!(builder.filters[2].value, Value::Null);
    }

    #[test]
    fn test_repeated_filters_on_one_column_are_all_kept() {
        let builder = test_client()
            .from("books")
            .gte("page_count", 100)
            .lte("page_count", 500);

        assert_eq!(builder.filters.len(), 2);
        assert_eq!(builder.filters[0].operator, FilterOperator::Gte);
        assert_eq!(builder.filters[1].operator, FilterOperator::Lte);
    }

    #[test]
    fn test_is_in_wraps_values_into_an_array() {
        let builder = test_client()
            .from("profiles")
            .is_in("id", vec!["u-1", "u-2"]);

        assert_eq!(builder.filters[0].operator, FilterOperator::In);
        assert_eq!(builder.filters[0].value, json!(["u-1", "u-2"]));
    }

    #[test]
    fn test_like_and_ilike_keep_the_raw_pattern() {
        let builder = test_client()
            .from("profiles")
            .like("display_name", "The %")
            .ilike("display_name", "%tolkien%");

        assert_eq!(builder.filters[0].value, json!("The %"));
        assert_eq!(builder.filters[1].operator, FilterOperator::Ilike);
        assert_eq!(builder.filters[1].value, json!("%tolkien%"));
    }
}

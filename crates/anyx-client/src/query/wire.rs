//! Wire layout of query requests.
//!
//! The proxy accepts one JSON document per query: the target collection plus
//! an operation-tagged body. Only fields meaningful to the operation are
//! serialized; state the builder accumulated under a different mode stays off
//! the wire.

use serde::Serialize;
use serde_json::Value;

use crate::query::builder::QueryBuilder;
use crate::query::types::{Filter, Operation, OrderDirective};

/// Complete request document sent to the query endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub collection: String,
    #[serde(flatten)]
    pub body: QueryBody,
}

/// Operation-specific portion of a query request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum QueryBody {
    Select {
        columns: String,
        filters: Vec<Filter>,
        order: Vec<OrderDirective>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
        single: bool,
    },
    Insert {
        values: Vec<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        select: Option<String>,
    },
    Update {
        values: Value,
        filters: Vec<Filter>,
        #[serde(skip_serializing_if = "Option::is_none")]
        select: Option<String>,
    },
    Delete {
        filters: Vec<Filter>,
    },
}

impl QueryBody {
    /// Operation this body encodes
    pub fn operation(&self) -> Operation {
        match self {
            QueryBody::Select { .. } => Operation::Select,
            QueryBody::Insert { .. } => Operation::Insert,
            QueryBody::Update { .. } => Operation::Update,
            QueryBody::Delete { .. } => Operation::Delete,
        }
    }
}

impl QueryBuilder {
    /// Snapshot the builder into the request document the proxy expects.
    ///
    /// Building the request does not consume or mutate the builder, so calling
    /// this twice yields identical documents.
    pub fn to_request(&self) -> QueryRequest {
        let body = match self.operation.unwrap_or(Operation::Select) {
            Operation::Select => QueryBody::Select {
                columns: self.columns.clone().unwrap_or_else(|| "*".to_string()),
                filters: self.filters.clone(),
                order: self.order.clone(),
                limit: self.limit,
                offset: self.offset,
                single: self.single,
            },
            Operation::Insert => QueryBody::Insert {
                values: self.insert_rows.clone(),
                select: self.custom_columns(),
            },
            Operation::Update => QueryBody::Update {
                values: self.update_values.clone().unwrap_or(Value::Null),
                filters: self.filters.clone(),
                select: self.custom_columns(),
            },
            Operation::Delete => QueryBody::Delete {
                filters: self.filters.clone(),
            },
        };
        QueryRequest {
            collection: self.collection.clone(),
            body,
        }
    }

    /// Projection to return from a write, when the caller asked for one.
    ///
    /// `"*"` is the proxy's default and is left implicit.
    fn custom_columns(&self) -> Option<String> {
        self.columns.clone().filter(|columns| columns != "*")
    }
}

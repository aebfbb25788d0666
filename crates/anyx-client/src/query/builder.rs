//! Query builder state

use std::sync::Arc;

use serde_json::Value;

use crate::client::ClientContext;
use crate::query::types::{Filter, Operation, OrderDirective};

/// Chainable builder for one query against one collection.
///
/// Builders are created through [`AnyxClient::from`](crate::client::AnyxClient::from)
/// and consumed by dispatch; every call starts from a fresh builder, so state
/// never leaks between queries. Each chaining method takes `self` by value and
/// returns it, which keeps accumulation explicit and rules out aliasing.
///
/// ```no_run
/// # use anyx_client::{AnyxClient, AnyxConfig};
/// # async fn demo() -> anyx_client::ClientResult<()> {
/// let client = AnyxClient::new(AnyxConfig::from_env())?;
/// let rows = client
///     .from("books")
///     .select("*")
///     .eq("author", "J.R.R. Tolkien")
///     .order("title")
///     .limit(20)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryBuilder {
    pub(crate) ctx: Arc<ClientContext>,
    pub(crate) collection: String,
    pub(crate) operation: Option<Operation>,
    pub(crate) columns: Option<String>,
    pub(crate) filters: Vec<Filter>,
    pub(crate) order: Vec<OrderDirective>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) single: bool,
    pub(crate) insert_rows: Vec<Value>,
    pub(crate) update_values: Option<Value>,
}

impl QueryBuilder {
    pub(crate) fn new(ctx: Arc<ClientContext>, collection: impl Into<String>) -> Self {
        Self {
            ctx,
            collection: collection.into(),
            operation: None,
            columns: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            single: false,
            insert_rows: Vec::new(),
            update_values: None,
        }
    }
}

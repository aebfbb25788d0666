//! Query Builder Module - Fluent, transport-backed query builder for collections

pub mod builder;
pub mod dml;
pub mod execute;
pub mod filters;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod types;
pub mod wire;

// Re-export main types and builder (minimal exports to avoid conflicts)
pub use builder::QueryBuilder;
pub use types::{Filter, FilterOperator, Operation, OrderDirective};
pub use wire::{QueryBody, QueryRequest};

//! # anyx-client
//!
//! Client for the Anyx query proxy: a chainable query builder, a thin HTTP
//! transport and bearer-token session handling.
//!
//! ## Features
//!
//! - Fluent query builder (select, insert, update, delete) over named
//!   collections
//! - Awaitable builders; `.await` and [`QueryBuilder::execute`] share one
//!   dispatch path
//! - Session storage behind a trait, with observers notified when the proxy
//!   rejects a token
//! - Pluggable transport with a scripted [`MockTransport`] for tests
//!
//! ```no_run
//! use anyx_client::{AnyxClient, AnyxConfig};
//!
//! # async fn demo() -> anyx_client::ClientResult<()> {
//! let client = AnyxClient::new(AnyxConfig::from_env())?;
//! let rows = client
//!     .from("books")
//!     .select("id, title")
//!     .ilike("title", "%hobbit%")
//!     .order("title")
//!     .limit(10)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod session;
pub mod transport;

pub use client::AnyxClient;
pub use config::*;
pub use error::*;
pub use query::*;
pub use session::*;
pub use transport::*;

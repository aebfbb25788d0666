//! Book metadata lookup.
//!
//! Registration resolves unknown ISBNs against an external catalog. The
//! lookup sits behind a trait so hosts can plug in whichever catalog they
//! license; [`StaticCatalog`] is a programmable stand-in for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::HarmonyResult;

/// Metadata a catalog returns for one ISBN
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBook {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub cover_url: Option<String>,
    pub page_count: Option<u32>,
}

impl CatalogBook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            publisher: None,
            cover_url: None,
            page_count: None,
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    pub fn page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }
}

/// Source of book metadata keyed by normalized ISBN
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve a normalized ISBN; `Ok(None)` means the catalog has no entry
    async fn lookup_isbn(&self, isbn: &str) -> HarmonyResult<Option<CatalogBook>>;
}

/// In-memory catalog double.
///
/// Entries are programmed up front; every lookup is recorded so tests can
/// assert when the catalog was and was not consulted.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, CatalogBook>,
    lookups: Mutex<Vec<String>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program an entry for `isbn`
    pub fn with_book(mut self, isbn: impl Into<String>, book: CatalogBook) -> Self {
        self.entries.insert(isbn.into(), book);
        self
    }

    /// ISBNs looked up so far, oldest first
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn lookup_isbn(&self, isbn: &str) -> HarmonyResult<Option<CatalogBook>> {
        self.lookups.lock().unwrap().push(isbn.to_string());
        Ok(self.entries.get(isbn).cloned())
    }
}

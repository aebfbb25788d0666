//! Collection, friend and lending services.
//!
//! Each service wraps the shared [`AnyxClient`] and expresses one feature
//! area as proxy queries. The proxy joins nothing, so related collections are
//! stitched together client side with batched `in` filters.

pub mod books;
pub mod friends;
pub mod lending;

pub use books::BookService;
pub use friends::FriendService;
pub use lending::LendingService;

use std::collections::HashMap;

use anyx_client::AnyxClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::HarmonyResult;
use crate::models::{Book, CollectionEntry, RowSet, UserBook};

/// Unwrap the proxy's row envelope into typed records
pub(crate) fn rows<T: DeserializeOwned>(value: Value) -> HarmonyResult<Vec<T>> {
    let set: RowSet<T> = serde_json::from_value(value)?;
    Ok(set.rows)
}

/// Load one user's collection: copies joined with their catalog books.
///
/// Copies referencing a missing book are dropped with a warning rather than
/// failing the whole listing.
pub(crate) async fn load_collection(
    client: &AnyxClient,
    user_id: Uuid,
) -> HarmonyResult<Vec<CollectionEntry>> {
    let copies: Vec<UserBook> = rows(
        client
            .from("user_books")
            .select("*")
            .eq("user_id", user_id.to_string())
            .order_desc("registered_at")
            .await?,
    )?;
    if copies.is_empty() {
        return Ok(Vec::new());
    }

    let book_ids: Vec<String> = copies.iter().map(|copy| copy.book_id.to_string()).collect();
    let books: Vec<Book> = rows(
        client
            .from("books")
            .select("*")
            .is_in("id", book_ids)
            .await?,
    )?;
    let books_by_id: HashMap<Uuid, Book> = books.into_iter().map(|book| (book.id, book)).collect();

    let mut entries = Vec::with_capacity(copies.len());
    for copy in copies {
        match books_by_id.get(&copy.book_id) {
            Some(book) => entries.push(CollectionEntry {
                book: book.clone(),
                user_book: copy,
            }),
            None => warn!(
                "Copy {} references missing book {}, leaving it out of the listing",
                copy.id, copy.book_id
            ),
        }
    }
    Ok(entries)
}

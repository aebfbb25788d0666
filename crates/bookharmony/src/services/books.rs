//! Collection management: registering, listing and updating copies

use std::sync::Arc;

use anyx_client::AnyxClient;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::CatalogLookup;
use crate::error::{HarmonyError, HarmonyResult};
use crate::models::{Book, CollectionEntry, UserBook};
use crate::services::{load_collection, rows};

/// Service backing the "my books" feature area
pub struct BookService {
    client: AnyxClient,
    catalog: Arc<dyn CatalogLookup>,
}

impl BookService {
    pub fn new(client: AnyxClient, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { client, catalog }
    }

    /// Register a copy of the book with the given ISBN for `user_id`.
    ///
    /// The catalog is only consulted for ISBNs no one has registered before;
    /// known books are shared. Registering a book already on the user's shelf
    /// is a conflict.
    pub async fn register_by_isbn(
        &self,
        user_id: Uuid,
        isbn: &str,
    ) -> HarmonyResult<CollectionEntry> {
        let isbn = normalize_isbn(isbn)?;
        debug!("Registering ISBN {} for user {}", isbn, user_id);

        let existing: Vec<Book> = rows(
            self.client
                .from("books")
                .select("*")
                .eq("isbn", isbn.clone())
                .limit(1)
                .await?,
        )?;

        let book = match existing.into_iter().next() {
            Some(book) => {
                let shelved: Vec<Value> = rows(
                    self.client
                        .from("user_books")
                        .select("id")
                        .eq("user_id", user_id.to_string())
                        .eq("book_id", book.id.to_string())
                        .limit(1)
                        .await?,
                )?;
                if !shelved.is_empty() {
                    return Err(HarmonyError::conflict(format!(
                        "'{}' is already in your collection",
                        book.title
                    )));
                }
                book
            }
            None => {
                let found = self.catalog.lookup_isbn(&isbn).await?.ok_or_else(|| {
                    HarmonyError::not_found(format!("no catalog entry for ISBN {}", isbn))
                })?;
                let book = Book {
                    id: Uuid::new_v4(),
                    isbn: isbn.clone(),
                    title: found.title,
                    author: found.author,
                    publisher: found.publisher,
                    cover_url: found.cover_url,
                    page_count: found.page_count,
                    created_at: Utc::now(),
                };
                self.client
                    .from("books")
                    .insert(serde_json::to_value(&book)?)
                    .await?;
                debug!("Created book {} for ISBN {}", book.id, isbn);
                book
            }
        };

        let user_book = UserBook {
            id: Uuid::new_v4(),
            user_id,
            book_id: book.id,
            read: false,
            registered_at: Utc::now(),
            read_at: None,
        };
        self.client
            .from("user_books")
            .insert(serde_json::to_value(&user_book)?)
            .await?;

        Ok(CollectionEntry { book, user_book })
    }

    /// List the user's collection, most recently registered first
    pub async fn collection(&self, user_id: Uuid) -> HarmonyResult<Vec<CollectionEntry>> {
        load_collection(&self.client, user_id).await
    }

    /// Mark a copy as read now
    pub async fn mark_read(&self, user_book_id: Uuid) -> HarmonyResult<()> {
        self.client
            .from("user_books")
            .update(json!({"read": true, "read_at": Utc::now()}))
            .eq("id", user_book_id.to_string())
            .await?;
        Ok(())
    }

    /// Move a copy back to unread
    pub async fn mark_unread(&self, user_book_id: Uuid) -> HarmonyResult<()> {
        self.client
            .from("user_books")
            .update(json!({"read": false, "read_at": null}))
            .eq("id", user_book_id.to_string())
            .await?;
        Ok(())
    }

    /// Remove a copy from the shelf; the shared catalog book stays
    pub async fn remove(&self, user_book_id: Uuid) -> HarmonyResult<()> {
        self.client
            .from("user_books")
            .delete()
            .eq("id", user_book_id.to_string())
            .await?;
        Ok(())
    }
}

/// Strip separators and validate the ISBN shape.
///
/// Accepts 10 or 13 significant characters; a check character of `x` is only
/// legal in last place of an ISBN-10 and is normalized to upper case.
fn normalize_isbn(raw: &str) -> HarmonyResult<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    let valid = match cleaned.len() {
        10 => cleaned
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || (i == 9 && (c == 'X' || c == 'x'))),
        13 => cleaned.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    };
    if !valid {
        return Err(HarmonyError::validation(format!(
            "'{}' is not a valid ISBN-10 or ISBN-13",
            raw
        )));
    }
    Ok(cleaned.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn_separators_are_stripped() {
        assert_eq!(
            normalize_isbn("978-0-261-10357-3").unwrap(),
            "9780261103573"
        );
        assert_eq!(normalize_isbn("0 261 10357 0").unwrap(), "0261103570");
    }

    #[test]
    fn test_isbn10_check_character_is_uppercased() {
        assert_eq!(normalize_isbn("043942089x").unwrap(), "043942089X");
    }

    #[test]
    fn test_wrong_lengths_and_stray_letters_are_rejected() {
        for bad in ["12345", "97802611035731", "97802611035x3", "isbn-not-set"] {
            let err = normalize_isbn(bad).unwrap_err();
            assert!(matches!(err, HarmonyError::Validation { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_x_is_only_legal_in_last_place_of_an_isbn10() {
        assert!(normalize_isbn("04394208X9").is_err());
        assert!(normalize_isbn("043942089X").is_ok());
    }
}

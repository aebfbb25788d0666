//! Record types stored behind the query proxy.
//!
//! Collections hold one JSON document per row; these structs mirror the
//! shapes the services read and write. Identifiers are UUIDs minted by the
//! writing client, timestamps are RFC 3339 in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog book, shared by every user owning a copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    /// Normalized ISBN, digits only
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub cover_url: Option<String>,
    pub page_count: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// One user's copy of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBook {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub read: bool,
    pub registered_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Directed friendship edge from `user_id` to `friend_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friendship {
    pub id: Uuid,
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Record of one copy lent to a friend; open while `returned_at` is null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub user_book_id: Uuid,
    pub owner_id: Uuid,
    pub borrower_id: Uuid,
    pub lent_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// A user's copy joined with its catalog book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub book: Book,
    pub user_book: UserBook,
}

/// An open loan joined with the book it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenLoan {
    pub loan: Loan,
    pub book: Book,
}

/// Row envelope every proxy response wraps its results in
#[derive(Debug, Deserialize)]
pub struct RowSet<T> {
    pub rows: Vec<T>,
}

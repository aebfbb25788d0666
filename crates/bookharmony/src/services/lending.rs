//! Lending: tracking copies handed to friends

use std::collections::HashMap;

use anyx_client::AnyxClient;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{HarmonyError, HarmonyResult};
use crate::models::{Book, Loan, OpenLoan, UserBook};
use crate::services::rows;

/// Service backing the lending feature area
pub struct LendingService {
    client: AnyxClient,
}

impl LendingService {
    pub fn new(client: AnyxClient) -> Self {
        Self { client }
    }

    /// Record that `owner_id` lent one of their copies to `borrower_id`.
    ///
    /// The copy must belong to the owner and must not already be out on an
    /// open loan.
    pub async fn lend(
        &self,
        owner_id: Uuid,
        user_book_id: Uuid,
        borrower_id: Uuid,
    ) -> HarmonyResult<Loan> {
        let owned: Vec<Value> = rows(
            self.client
                .from("user_books")
                .select("id")
                .eq("id", user_book_id.to_string())
                .eq("user_id", owner_id.to_string())
                .limit(1)
                .await?,
        )?;
        if owned.is_empty() {
            return Err(HarmonyError::not_found(
                "this copy is not in your collection",
            ));
        }

        let open: Vec<Value> = rows(
            self.client
                .from("loans")
                .select("id")
                .eq("user_book_id", user_book_id.to_string())
                .is_null("returned_at")
                .limit(1)
                .await?,
        )?;
        if !open.is_empty() {
            return Err(HarmonyError::conflict("this copy is already lent out"));
        }

        let loan = Loan {
            id: Uuid::new_v4(),
            user_book_id,
            owner_id,
            borrower_id,
            lent_at: Utc::now(),
            returned_at: None,
        };
        self.client
            .from("loans")
            .insert(serde_json::to_value(&loan)?)
            .await?;
        debug!("Copy {} lent to {}", user_book_id, borrower_id);

        Ok(loan)
    }

    /// Close a loan by stamping its return time.
    ///
    /// The filter on `returned_at` keeps a second call from moving the
    /// timestamp of an already closed loan.
    pub async fn mark_returned(&self, loan_id: Uuid) -> HarmonyResult<()> {
        self.client
            .from("loans")
            .update(json!({"returned_at": Utc::now()}))
            .eq("id", loan_id.to_string())
            .is_null("returned_at")
            .await?;
        Ok(())
    }

    /// Every copy `owner_id` currently has out, joined with its book
    pub async fn open_loans(&self, owner_id: Uuid) -> HarmonyResult<Vec<OpenLoan>> {
        let loans: Vec<Loan> = rows(
            self.client
                .from("loans")
                .select("*")
                .eq("owner_id", owner_id.to_string())
                .is_null("returned_at")
                .order_desc("lent_at")
                .await?,
        )?;
        if loans.is_empty() {
            return Ok(Vec::new());
        }

        let copy_ids: Vec<String> = loans.iter().map(|loan| loan.user_book_id.to_string()).collect();
        let copies: Vec<UserBook> = rows(
            self.client
                .from("user_books")
                .select("*")
                .is_in("id", copy_ids)
                .await?,
        )?;
        let book_id_by_copy: HashMap<Uuid, Uuid> = copies
            .iter()
            .map(|copy| (copy.id, copy.book_id))
            .collect();

        let book_ids: Vec<String> = copies.iter().map(|copy| copy.book_id.to_string()).collect();
        let books: Vec<Book> = rows(
            self.client
                .from("books")
                .select("*")
                .is_in("id", book_ids)
                .await?,
        )?;
        let books_by_id: HashMap<Uuid, Book> = books.into_iter().map(|book| (book.id, book)).collect();

        let mut open = Vec::with_capacity(loans.len());
        for loan in loans {
            let book = book_id_by_copy
                .get(&loan.user_book_id)
                .and_then(|book_id| books_by_id.get(book_id));
            match book {
                Some(book) => open.push(OpenLoan {
                    loan,
                    book: book.clone(),
                }),
                None => warn!(
                    "Loan {} references missing copy {}, leaving it out of the listing",
                    loan.id,
                    loan.user_book_id
                ),
            }
        }
        Ok(open)
    }
}

//! Friend graph: finding users, linking them and browsing their shelves

use anyx_client::AnyxClient;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{HarmonyError, HarmonyResult};
use crate::models::{CollectionEntry, Friendship, UserProfile};
use crate::services::{load_collection, rows};

/// How many profiles a search returns at most
const SEARCH_LIMIT: u64 = 20;

/// Service backing the friends feature area
pub struct FriendService {
    client: AnyxClient,
}

impl FriendService {
    pub fn new(client: AnyxClient) -> Self {
        Self { client }
    }

    /// Find profiles whose display name contains `term`, case-insensitively.
    ///
    /// A blank term matches nobody instead of everybody.
    pub async fn search_profiles(&self, term: &str) -> HarmonyResult<Vec<UserProfile>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        rows(
            self.client
                .from("profiles")
                .select("*")
                .ilike("display_name", format!("%{}%", term))
                .order("display_name")
                .limit(SEARCH_LIMIT)
                .await?,
        )
    }

    /// Link `friend_id` into `user_id`'s friend list
    pub async fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> HarmonyResult<Friendship> {
        if user_id == friend_id {
            return Err(HarmonyError::validation(
                "cannot add yourself as a friend",
            ));
        }

        let existing: Vec<Value> = rows(
            self.client
                .from("friendships")
                .select("id")
                .eq("user_id", user_id.to_string())
                .eq("friend_id", friend_id.to_string())
                .limit(1)
                .await?,
        )?;
        if !existing.is_empty() {
            return Err(HarmonyError::conflict("already friends with this user"));
        }

        let friendship = Friendship {
            id: Uuid::new_v4(),
            user_id,
            friend_id,
            created_at: Utc::now(),
        };
        self.client
            .from("friendships")
            .insert(serde_json::to_value(&friendship)?)
            .await?;
        debug!("User {} befriended {}", user_id, friend_id);

        Ok(friendship)
    }

    /// Profiles of everyone on `user_id`'s friend list, by display name
    pub async fn friends_of(&self, user_id: Uuid) -> HarmonyResult<Vec<UserProfile>> {
        let friendships: Vec<Friendship> = rows(
            self.client
                .from("friendships")
                .select("*")
                .eq("user_id", user_id.to_string())
                .await?,
        )?;
        if friendships.is_empty() {
            return Ok(Vec::new());
        }

        let friend_ids: Vec<String> = friendships
            .iter()
            .map(|friendship| friendship.friend_id.to_string())
            .collect();
        rows(
            self.client
                .from("profiles")
                .select("*")
                .is_in("id", friend_ids)
                .order("display_name")
                .await?,
        )
    }

    /// Browse a friend's collection.
    ///
    /// Only shelves of users on `user_id`'s friend list are visible.
    pub async fn friend_collection(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> HarmonyResult<Vec<CollectionEntry>> {
        let link: Vec<Value> = rows(
            self.client
                .from("friendships")
                .select("id")
                .eq("user_id", user_id.to_string())
                .eq("friend_id", friend_id.to_string())
                .limit(1)
                .await?,
        )?;
        if link.is_empty() {
            return Err(HarmonyError::not_found(
                "this user is not on your friend list",
            ));
        }

        load_collection(&self.client, friend_id).await
    }
}

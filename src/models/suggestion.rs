use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A proposed connection between two users that can possibly know each
/// other.
///
/// Suggestions are created by comparing profile fields (like city or
/// address) or by matching imported contacts against existing accounts by
/// name and email; both producers live outside this crate. Storage enforces
/// at most one suggestion per directed (to, from) pair, and rows are never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendshipSuggestion {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub added: DateTime<Utc>,
}

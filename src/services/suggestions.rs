use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{FriendshipSuggestion, ImportedContact},
};

pub struct SuggestionsService {
    db: PgPool,
}

impl SuggestionsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a proposed connection from one user to another. At most one
    /// suggestion exists per directed pair; a second attempt is rejected.
    pub async fn create_suggestion(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> AppResult<FriendshipSuggestion> {
        if from_user_id == to_user_id {
            return Err(AppError::CannotSuggestSelf);
        }

        let suggestion: FriendshipSuggestion = sqlx::query_as(
            r#"
            INSERT INTO friendship_suggestions (id, from_user_id, to_user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::SuggestionAlreadyExists
            }
            _ => AppError::Database(e),
        })?;

        Ok(suggestion)
    }

    /// Suggestions addressed to a user, newest first.
    pub async fn suggestions_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<FriendshipSuggestion>> {
        let suggestions: Vec<FriendshipSuggestion> = sqlx::query_as(
            "SELECT * FROM friendship_suggestions WHERE to_user_id = $1 ORDER BY added DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(suggestions)
    }

    /// Delete one suggestion, e.g. after the receiving user dismissed it.
    pub async fn remove_suggestion(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM friendship_suggestions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::SuggestionNotFound);
        }

        Ok(())
    }

    /// Drop both directions of a pair, e.g. once the users become friends.
    /// Returns the number of suggestions removed.
    pub async fn remove_suggestions_between(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendship_suggestions
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Contacts imported by an owner, newest first.
    pub async fn imported_contacts(&self, owner_id: Uuid) -> AppResult<Vec<ImportedContact>> {
        let contacts: Vec<ImportedContact> = sqlx::query_as(
            "SELECT * FROM imported_contacts WHERE owner_id = $1 ORDER BY added DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(contacts)
    }
}

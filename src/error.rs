use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Suggestion errors
    #[error("Suggestion not found")]
    SuggestionNotFound,
    #[error("Suggestion already exists")]
    SuggestionAlreadyExists,
    #[error("Cannot suggest a user to themselves")]
    CannotSuggestSelf,

    // Import errors
    #[error("Unknown import task: {0}")]
    UnknownTask(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

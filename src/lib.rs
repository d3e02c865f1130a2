//! Friendship suggestions built from imported contact lists.
//!
//! Users import their address books from external services (Google,
//! Facebook, Twitter, Yahoo, LinkedIn); imported contacts are matched
//! against existing accounts elsewhere and surface here as
//! [`models::FriendshipSuggestion`] rows. This crate owns the storage schema
//! for both record kinds, the deduplicating persistence layer for imports,
//! and the sync/async execution wiring for the per-provider import tasks.
//!
//! The per-service API clients, the matching algorithm and the task-queue
//! backend are external collaborators; they plug in through the
//! [`services::imports::ContactSource`] and [`tasks::TaskRegistry`] seams.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};

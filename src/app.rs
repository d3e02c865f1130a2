use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        imports::ContactSource,
        persistence::{ContactPersistence, PgPersistence},
        suggestions::SuggestionsService,
    },
    tasks::Runner,
};

/// Composition root: owns the database pool and the configured runner.
///
/// The contact source is injected by the embedding application since the
/// per-service API clients live outside this crate.
pub struct App {
    db: PgPool,
    runner: Runner,
    config: Config,
}

impl App {
    /// Connect to Postgres, run migrations and build the runner selected by
    /// the configuration.
    ///
    /// A persistence strategy may be injected, e.g. `NullPersistence` for a
    /// dry run; by default imports land in Postgres.
    pub async fn init(
        config: Config,
        source: Arc<dyn ContactSource>,
        persistence: Option<Arc<dyn ContactPersistence>>,
    ) -> AppResult<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database_url())
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&db).await?;
        tracing::info!("Database migrations completed");

        let persistence =
            persistence.unwrap_or_else(|| Arc::new(PgPersistence::new(db.clone())));
        let runner = Runner::from_config(config.runner_mode, source, persistence);
        tracing::info!(
            mode = ?config.runner_mode,
            tasks = runner.registered_tasks(),
            "Import runner ready"
        );

        Ok(Self { db, runner, config })
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn suggestions(&self) -> SuggestionsService {
        SuggestionsService::new(self.db.clone())
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn shutdown(self) {
        self.db.close().await;
        tracing::info!("Database pool closed");
    }
}

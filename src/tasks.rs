use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    config::RunnerMode,
    error::{AppError, AppResult},
    models::{ImportCredentials, Provider},
    services::{
        imports::{ContactSource, ProviderImport},
        persistence::{ContactPersistence, ImportStatus},
    },
};

/// Import tasks known to the asynchronous backend, keyed by task name.
///
/// An explicit instance owned by the composition root; nothing registers
/// itself at load time.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<&'static str, Arc<ProviderImport>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Arc<ProviderImport>) {
        let name = task.provider().task_name();
        tracing::debug!(task = name, "registering import task");
        self.tasks.insert(name, task);
    }

    pub fn get(&self, name: &str) -> Option<Arc<ProviderImport>> {
        self.tasks.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registered task names, sorted for stable output.
    pub fn task_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tasks.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Execution strategy for provider imports, selected from configuration at
/// startup.
pub enum Runner {
    Sync(SyncRunner),
    Async(AsyncRunner),
}

impl Runner {
    pub fn from_config(
        mode: RunnerMode,
        source: Arc<dyn ContactSource>,
        persistence: Arc<dyn ContactPersistence>,
    ) -> Self {
        match mode {
            RunnerMode::Sync => Runner::Sync(SyncRunner::new(source, persistence)),
            RunnerMode::Async => Runner::Async(AsyncRunner::new(source, persistence)),
        }
    }

    /// Number of tasks registered with the task backend. Zero in sync mode.
    pub fn registered_tasks(&self) -> usize {
        match self {
            Runner::Sync(_) => 0,
            Runner::Async(runner) => runner.registry().len(),
        }
    }
}

/// Runs imports inline in the caller's task, sequentially. Nothing is
/// handed to the task backend.
pub struct SyncRunner {
    source: Arc<dyn ContactSource>,
    persistence: Arc<dyn ContactPersistence>,
}

impl SyncRunner {
    pub fn new(source: Arc<dyn ContactSource>, persistence: Arc<dyn ContactPersistence>) -> Self {
        Self {
            source,
            persistence,
        }
    }

    pub async fn import(
        &self,
        provider: Provider,
        credentials: &ImportCredentials,
    ) -> AppResult<ImportStatus> {
        ProviderImport::new(provider, self.source.clone(), self.persistence.clone())
            .run(credentials)
            .await
    }
}

/// Hands each provider import to tokio as an independent unit of work.
///
/// Construction registers one task per supported provider. Retry, backoff
/// and ordering are the backend's concern, not this crate's.
pub struct AsyncRunner {
    registry: TaskRegistry,
}

impl AsyncRunner {
    pub fn new(source: Arc<dyn ContactSource>, persistence: Arc<dyn ContactPersistence>) -> Self {
        let mut registry = TaskRegistry::new();
        for provider in Provider::ALL {
            registry.register(Arc::new(ProviderImport::new(
                provider,
                source.clone(),
                persistence.clone(),
            )));
        }
        Self { registry }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Dispatch one provider import; the handle resolves to the final
    /// import status.
    pub fn dispatch(
        &self,
        provider: Provider,
        credentials: ImportCredentials,
    ) -> AppResult<JoinHandle<AppResult<ImportStatus>>> {
        let task = self
            .registry
            .get(provider.task_name())
            .ok_or_else(|| AppError::UnknownTask(provider.task_name().to_string()))?;
        Ok(tokio::spawn(async move { task.run(&credentials).await }))
    }
}

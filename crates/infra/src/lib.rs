mod config;
mod locale_cache;
mod repos;
mod scheduler;
mod services;
mod sessions;
mod system;

pub use config::{Config, ConfigError};
pub use locale_cache::{ILocaleCache, WriteThroughLocaleCache};
pub use repos::{IProductRepo, IUserRepo, Repos};
pub use scheduler::ReminderScheduler;
pub use services::telegram::{IncomingUpdate, TelegramBotApi};
pub use services::{IMessenger, InMemoryMessenger, SentMessage};
pub use sessions::SessionStore;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

/// Everything the use cases need to talk to the outside world
#[derive(Clone)]
pub struct PantryContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub locales: Arc<dyn ILocaleCache>,
    pub sessions: SessionStore,
    pub scheduler: ReminderScheduler,
    pub messenger: Arc<dyn IMessenger>,
}

impl PantryContext {
    /// Builds the context on top of the given repositories and warms up the locale cache
    pub async fn create(
        repos: Repos,
        config: Config,
        sys: Arc<dyn ISys>,
        messenger: Arc<dyn IMessenger>,
    ) -> anyhow::Result<Self> {
        let locales = Arc::new(WriteThroughLocaleCache::new(repos.users.clone()));
        locales.warm_up().await?;

        Ok(Self {
            repos,
            config,
            scheduler: ReminderScheduler::new(sys.clone()),
            sys,
            locales,
            sessions: SessionStore::new(),
            messenger,
        })
    }

    /// Context backed by in memory repositories
    pub async fn create_inmemory(
        config: Config,
        messenger: Arc<dyn IMessenger>,
    ) -> anyhow::Result<Self> {
        Self::create(
            Repos::create_inmemory(),
            config,
            Arc::new(RealSys {}),
            messenger,
        )
        .await
    }
}

/// Will setup the infrastructure context given the config
pub async fn setup_context(
    config: Config,
    messenger: Arc<dyn IMessenger>,
) -> anyhow::Result<PantryContext> {
    let repos = Repos::create_sqlite(&config.database_path).await?;
    PantryContext::create(repos, config, Arc::new(RealSys {}), messenger).await
}

use crate::repos::IUserRepo;
use pantry_reminder_domain::{Locale, User, UserId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Process wide user id -> `Locale` lookup read on every interaction
#[async_trait::async_trait]
pub trait ILocaleCache: Send + Sync {
    /// Loads every stored locale into the cache
    async fn warm_up(&self) -> anyhow::Result<usize>;
    /// The cached locale of the `User`, or the default one
    fn get(&self, user_id: UserId) -> Locale;
    /// Persists the locale and only then caches it
    async fn set(&self, user_id: UserId, locale: Locale) -> anyhow::Result<()>;
}

pub struct WriteThroughLocaleCache {
    users: Arc<dyn IUserRepo>,
    cache: RwLock<HashMap<UserId, Locale>>,
}

impl WriteThroughLocaleCache {
    pub fn new(users: Arc<dyn IUserRepo>) -> Self {
        Self {
            users,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ILocaleCache for WriteThroughLocaleCache {
    async fn warm_up(&self) -> anyhow::Result<usize> {
        let users = self.users.find_all().await?;
        let mut cache = self.cache.write().unwrap();
        for user in &users {
            cache.insert(user.id, user.locale);
        }
        info!("Loaded locales of {} users", users.len());
        Ok(users.len())
    }

    fn get(&self, user_id: UserId) -> Locale {
        self.cache
            .read()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    async fn set(&self, user_id: UserId, locale: Locale) -> anyhow::Result<()> {
        self.users.upsert(&User::new(user_id, locale)).await?;
        self.cache.write().unwrap().insert(user_id, locale);
        Ok(())
    }
}

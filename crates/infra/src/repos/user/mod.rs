mod inmemory;
mod sqlite;

pub use inmemory::InMemoryUserRepo;
use pantry_reminder_domain::{Locale, User, UserId};
pub use sqlite::SqliteUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    /// Creates the `User` or replaces its locale
    async fn upsert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: UserId) -> anyhow::Result<Option<User>>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;

    /// The stored locale of the `User`, or the default one for unknown users
    async fn get_locale(&self, user_id: UserId) -> anyhow::Result<Locale> {
        Ok(self
            .find(user_id)
            .await?
            .map(|user| user.locale)
            .unwrap_or_default())
    }
}

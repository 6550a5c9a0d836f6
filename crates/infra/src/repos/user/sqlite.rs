use super::IUserRepo;
use pantry_reminder_domain::{Locale, User, UserId};
use sqlx::{FromRow, SqlitePool};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_id: i64,
    locale: String,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        User {
            id: UserId::new(raw.user_id),
            locale: Locale::from_code_or_default(&raw.locale),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for SqliteUserRepo {
    async fn upsert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_id, locale)
            VALUES(?, ?)
            ON CONFLICT(user_id) DO UPDATE SET locale = excluded.locale
            "#,
        )
        .bind(user.id.inner())
        .bind(user.locale.code())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: UserId) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT user_id, locale FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(|u| u.into()))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT user_id, locale FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}

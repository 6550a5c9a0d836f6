use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use pantry_reminder_domain::{User, UserId};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn upsert(&self, user: &User) -> anyhow::Result<()> {
        upsert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: UserId) -> anyhow::Result<Option<User>> {
        Ok(find(&user_id, &self.users))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(find_by(&self.users, |_| true))
    }
}

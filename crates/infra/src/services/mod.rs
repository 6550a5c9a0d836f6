mod inmemory;
pub mod telegram;

pub use inmemory::{InMemoryMessenger, SentMessage};
use pantry_reminder_domain::{Keyboard, UserId};

/// Outbound side of the chat transport
#[async_trait::async_trait]
pub trait IMessenger: Send + Sync {
    async fn send(
        &self,
        user_id: UserId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> anyhow::Result<()>;
}

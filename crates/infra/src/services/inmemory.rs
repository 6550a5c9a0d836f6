use super::IMessenger;
use pantry_reminder_domain::{Keyboard, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub user_id: UserId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

/// Messenger that keeps every outgoing message in memory.
/// Used when running tests and when no chat transport is configured.
pub struct InMemoryMessenger {
    sent: Mutex<Vec<SentMessage>>,
    attempts: AtomicUsize,
    failing: bool,
    delivered: Notify,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failing: false,
            delivered: Notify::new(),
        }
    }

    /// A messenger rejecting every message
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Number of send calls, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, user_id: UserId) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Waits until at least `count` messages have been delivered.
    /// Returns false if that did not happen within `timeout`.
    pub async fn wait_for_messages(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let delivered = self.delivered.notified();
            if self.sent.lock().unwrap().len() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, delivered).await.is_err() {
                return self.sent.lock().unwrap().len() >= count;
            }
        }
    }
}

impl Default for InMemoryMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMessenger for InMemoryMessenger {
    async fn send(
        &self,
        user_id: UserId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow::anyhow!("Messenger rejected message to {}", user_id));
        }
        self.sent.lock().unwrap().push(SentMessage {
            user_id,
            text: text.to_string(),
            keyboard,
        });
        self.delivered.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_records_messages() {
        let messenger = InMemoryMessenger::new();
        messenger
            .send(UserId::new(1), "hello", Some(Keyboard::Remove))
            .await
            .unwrap();
        messenger.send(UserId::new(2), "hi", None).await.unwrap();

        assert_eq!(messenger.sent().len(), 2);
        let to_first = messenger.sent_to(UserId::new(1));
        assert_eq!(to_first.len(), 1);
        assert_eq!(to_first[0].text, "hello");
        assert_eq!(to_first[0].keyboard, Some(Keyboard::Remove));
        assert!(messenger.wait_for_messages(2, Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn failing_messenger_counts_attempts() {
        let messenger = InMemoryMessenger::failing();
        assert!(messenger.send(UserId::new(1), "hello", None).await.is_err());
        assert_eq!(messenger.attempts(), 1);
        assert!(messenger.sent().is_empty());
        assert!(!messenger.wait_for_messages(1, Duration::from_millis(20)).await);
    }
}

use pantry_reminder_domain::{ConversationSession, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// In memory conversation sessions, one per `User`.
///
/// Holding the guard returned by `lock` serializes the handling of events
/// for that `User` while other users proceed concurrently.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<UserId, Arc<AsyncMutex<ConversationSession>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(&self, user_id: UserId) -> OwnedMutexGuard<ConversationSession> {
        let session = {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.entry(user_id).or_default().clone()
        };
        session.lock_owned().await
    }

    /// A copy of the current session of the `User`
    pub async fn snapshot(&self, user_id: UserId) -> ConversationSession {
        let session = self.lock(user_id).await;
        let snapshot = session.clone();
        self.release(user_id, session);
        snapshot
    }

    /// Unlocks the session and forgets it when it is back to its initial
    /// state and nobody else holds or waits for it.
    pub fn release(&self, user_id: UserId, session: OwnedMutexGuard<ConversationSession>) {
        drop(session);

        let mut sessions = self.sessions.lock().unwrap();
        let forget = match sessions.get(&user_id) {
            Some(session) => {
                Arc::strong_count(session) == 1
                    && session
                        .try_lock()
                        .map(|s| *s == ConversationSession::default())
                        .unwrap_or(false)
            }
            None => false,
        };
        if forget {
            sessions.remove(&user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_reminder_domain::ConversationState;

    #[tokio::test]
    async fn sessions_are_independent_per_user() {
        let store = SessionStore::new();
        {
            let mut session = store.lock(UserId::new(1)).await;
            session.state = ConversationState::AwaitingName;
        }
        assert_eq!(
            store.snapshot(UserId::new(1)).await.state,
            ConversationState::AwaitingName
        );
        assert_eq!(
            store.snapshot(UserId::new(2)).await.state,
            ConversationState::Idle
        );
    }

    fn tracked(store: &SessionStore) -> usize {
        store.sessions.lock().unwrap().len()
    }

    #[tokio::test]
    async fn idle_sessions_are_forgotten_on_release() {
        let store = SessionStore::new();
        for id in 1..=100 {
            let session = store.lock(UserId::new(id)).await;
            store.release(UserId::new(id), session);
        }
        assert_eq!(tracked(&store), 0);

        let mut session = store.lock(UserId::new(1)).await;
        session.state = ConversationState::AwaitingName;
        store.release(UserId::new(1), session);
        assert_eq!(tracked(&store), 1);

        let mut session = store.lock(UserId::new(1)).await;
        session.reset();
        store.release(UserId::new(1), session);
        assert_eq!(tracked(&store), 0);
    }

    #[tokio::test]
    async fn session_with_waiter_is_kept_on_release() {
        let store = SessionStore::new();
        let session = store.lock(UserId::new(1)).await;

        let waiter = {
            let store = store.clone();
            tokio::spawn(async move {
                let mut session = store.lock(UserId::new(1)).await;
                session.state = ConversationState::AwaitingName;
                store.release(UserId::new(1), session);
            })
        };
        while Arc::strong_count(&store.sessions.lock().unwrap()[&UserId::new(1)]) < 2 {
            tokio::task::yield_now().await;
        }

        store.release(UserId::new(1), session);
        waiter.await.unwrap();

        assert_eq!(
            store.snapshot(UserId::new(1)).await.state,
            ConversationState::AwaitingName
        );
    }

    #[tokio::test]
    async fn lock_is_exclusive_per_user() {
        let store = SessionStore::new();
        let guard = store.lock(UserId::new(1)).await;

        let other_user = store.lock(UserId::new(2)).await;
        drop(other_user);

        let same_user = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            store.lock(UserId::new(1)),
        )
        .await;
        assert!(same_user.is_err());

        drop(guard);
        assert!(tokio::time::timeout(
            std::time::Duration::from_millis(50),
            store.lock(UserId::new(1))
        )
        .await
        .is_ok());
    }
}

use crate::shared::entity::ID;

/// Where a `User` is in the product intake dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    ChoosingLanguage,
    AwaitingName,
    AwaitingExpiration,
    AwaitingNotifyChoice,
    AwaitingCustomTime,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Product fields collected so far in the intake dialogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    /// Anchor instant in millis
    pub expiration: Option<i64>,
    /// The stored `Product` a custom reminder time will be attached to
    pub product_id: Option<ID>,
}

/// Transient per user state. Only completed products are durable,
/// so a restart drops every session back to `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationSession {
    pub state: ConversationState,
    pub draft: ProductDraft,
}

impl ConversationSession {
    /// Drops the draft and goes back to `Idle`
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drops the draft and moves to `state`
    pub fn restart_at(&mut self, state: ConversationState) {
        self.draft = ProductDraft::default();
        self.state = state;
    }
}

use crate::error::ConversationError;
use crate::shared::usecase::UseCase;
use pantry_reminder_domain::{Locale, User, UserId};
use pantry_reminder_infra::PantryContext;
use tracing::error;

/// Stores the chosen `Locale` of a `User`, creating the `User` on first use
#[derive(Debug)]
pub struct SetLanguageUseCase {
    pub user_id: UserId,
    pub locale: Locale,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ConversationError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::Storage(SetLanguageUseCase::NAME),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetLanguageUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "SetLanguage";

    async fn execute(&mut self, ctx: &PantryContext) -> Result<Self::Response, Self::Error> {
        ctx.locales
            .set(self.user_id, self.locale)
            .await
            .map_err(|e| {
                error!(
                    "Unable to store locale {} of user {}. Err: {:?}",
                    self.locale.code(),
                    self.user_id,
                    e
                );
                UseCaseError::StorageError
            })?;

        Ok(User::new(self.user_id, self.locale))
    }
}

use super::subscribers::ScheduleReminderOnCustomTimeAttached;
use crate::error::ConversationError;
use crate::shared::usecase::{Subscriber, UseCase};
use pantry_reminder_domain::{Product, UserId, ID};
use pantry_reminder_infra::PantryContext;
use tracing::error;

#[derive(Debug)]
pub struct AttachCustomTimeUseCase {
    pub owner: UserId,
    pub product_id: ID,
    pub custom_time: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ConversationError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::Rejected(AttachCustomTimeUseCase::NAME),
            UseCaseError::StorageError => Self::Storage(AttachCustomTimeUseCase::NAME),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AttachCustomTimeUseCase {
    type Response = Product;

    type Error = UseCaseError;

    const NAME: &'static str = "AttachCustomTime";

    async fn execute(&mut self, ctx: &PantryContext) -> Result<Self::Response, Self::Error> {
        let product = ctx
            .repos
            .products
            .attach_custom_time(self.product_id, self.owner, self.custom_time)
            .await
            .map_err(|e| {
                error!(
                    "Unable to attach custom time to product {}. Err: {:?}",
                    self.product_id, e
                );
                UseCaseError::StorageError
            })?;

        product.ok_or(UseCaseError::NotFound(self.product_id))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleReminderOnCustomTimeAttached)]
    }
}

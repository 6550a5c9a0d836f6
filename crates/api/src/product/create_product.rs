use super::subscribers::ScheduleRemindersOnProductCreated;
use crate::error::ConversationError;
use crate::shared::usecase::{Subscriber, UseCase};
use pantry_reminder_domain::{NewProduct, NotifyChoice, Product, UserId};
use pantry_reminder_infra::PantryContext;
use tracing::error;

#[derive(Debug)]
pub struct CreateProductUseCase {
    pub owner: UserId,
    pub name: String,
    /// Anchor instant: the expiration date at the notification hour
    pub expiration: i64,
    pub choice: NotifyChoice,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for ConversationError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::Rejected(CreateProductUseCase::NAME),
            UseCaseError::StorageError => Self::Storage(CreateProductUseCase::NAME),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateProductUseCase {
    type Response = Product;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateProduct";

    async fn execute(&mut self, ctx: &PantryContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let product = NewProduct {
            owner: self.owner,
            name: name.to_string(),
            expiration: self.expiration,
            notify_day_before: self.choice.notify_day_before(),
            notify_week_before: self.choice.notify_week_before(),
        };

        ctx.repos.products.insert(&product).await.map_err(|e| {
            error!(
                "Unable to store product for user {}. Err: {:?}",
                self.owner, e
            );
            UseCaseError::StorageError
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnProductCreated)]
    }
}

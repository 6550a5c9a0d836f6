use super::schedule_reminders;
use crate::shared::usecase::UseCase;
use pantry_reminder_domain::ReminderKind;
use pantry_reminder_infra::PantryContext;
use tracing::{error, info};

/// Rebuilds the pending reminders from the stored products.
/// Running it more than once registers the same jobs again without duplicates.
#[derive(Debug)]
pub struct RecoverRemindersUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecoverRemindersUseCase {
    /// Number of registered jobs
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "RecoverReminders";

    async fn execute(&mut self, ctx: &PantryContext) -> Result<Self::Response, Self::Error> {
        let products = ctx.repos.products.find_all().await.map_err(|e| {
            error!("Unable to load products for reminder recovery. Err: {:?}", e);
            UseCaseError::StorageError
        })?;

        let recovered: usize = products
            .iter()
            .map(|product| schedule_reminders(ctx, product, &ReminderKind::ALL))
            .sum();
        info!(
            "Recovered {} reminders of {} products",
            recovered,
            products.len()
        );

        Ok(recovered)
    }
}

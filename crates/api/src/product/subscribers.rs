use super::{attach_custom_time::AttachCustomTimeUseCase, create_product::CreateProductUseCase};
use crate::reminder::schedule_reminders;
use crate::shared::usecase::Subscriber;
use pantry_reminder_domain::{Product, ReminderKind};
use pantry_reminder_infra::PantryContext;

pub struct ScheduleRemindersOnProductCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateProductUseCase> for ScheduleRemindersOnProductCreated {
    async fn notify(&self, product: &Product, ctx: &PantryContext) {
        schedule_reminders(ctx, product, &ReminderKind::ALL);
    }
}

pub struct ScheduleReminderOnCustomTimeAttached;

#[async_trait::async_trait(?Send)]
impl Subscriber<AttachCustomTimeUseCase> for ScheduleReminderOnCustomTimeAttached {
    async fn notify(&self, product: &Product, ctx: &PantryContext) {
        // The week and day reminders were registered on creation and may have fired already
        schedule_reminders(ctx, product, &[ReminderKind::Custom]);
    }
}

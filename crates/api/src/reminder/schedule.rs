use super::render_reminder;
use pantry_reminder_domain::{JobKey, Locale, Product, ReminderJob, ReminderKind, ReminderSettings};
use pantry_reminder_infra::PantryContext;

/// One job per reminder kind enabled on the `Product`
pub fn reminder_jobs(product: &Product, locale: Locale, settings: &ReminderSettings) -> Vec<ReminderJob> {
    product
        .reminder_plan(settings)
        .into_iter()
        .map(|(kind, fires_at)| ReminderJob {
            key: JobKey::new(product.id, kind),
            owner: product.owner,
            fires_at,
            text: render_reminder(product, kind, locale, &settings.timezone),
        })
        .collect()
}

/// Registers the jobs of `product` whose kind is listed in `kinds`,
/// replacing pending jobs with the same key. Returns the number of registered jobs.
pub fn schedule_reminders(ctx: &PantryContext, product: &Product, kinds: &[ReminderKind]) -> usize {
    let settings = ctx.config.reminder_settings();
    let locale = ctx.locales.get(product.owner);

    let mut scheduled = 0;
    for job in reminder_jobs(product, locale, &settings) {
        if kinds.contains(&job.key.kind) {
            ctx.scheduler.schedule(job);
            scheduled += 1;
        }
    }
    scheduled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{moscow_millis, setup};
    use pantry_reminder_domain::{UserId, ID};

    fn product(day: bool, week: bool, custom_time: Option<i64>) -> Product {
        Product {
            id: ID::new(7),
            owner: UserId::new(1),
            name: "Cheese".into(),
            expiration: moscow_millis(2025, 6, 1, 9, 0),
            notify_day_before: day,
            notify_week_before: week,
            custom_time,
        }
    }

    #[actix_web::test]
    async fn derives_jobs_from_enabled_kinds() {
        let (ctx, _) = setup().await;
        let settings = ctx.config.reminder_settings();

        let jobs = reminder_jobs(&product(false, true, None), Locale::En, &settings);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].key, JobKey::new(ID::new(7), ReminderKind::Week));
        assert_eq!(jobs[0].owner, UserId::new(1));
        assert_eq!(jobs[0].fires_at, moscow_millis(2025, 5, 25, 9, 0));

        assert!(reminder_jobs(&product(false, false, None), Locale::En, &settings).is_empty());
    }

    #[actix_web::test]
    async fn schedules_only_requested_kinds() {
        let (ctx, _) = setup().await;
        let product = product(true, true, Some(moscow_millis(2025, 5, 15, 14, 30)));

        assert_eq!(schedule_reminders(&ctx, &product, &[ReminderKind::Custom]), 1);
        assert_eq!(ctx.scheduler.pending().len(), 1);

        assert_eq!(schedule_reminders(&ctx, &product, &ReminderKind::ALL), 3);
        assert_eq!(ctx.scheduler.pending().len(), 3);
    }
}

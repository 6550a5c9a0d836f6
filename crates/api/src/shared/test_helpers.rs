use chrono::TimeZone;
use pantry_reminder_infra::{Config, InMemoryMessenger, PantryContext};
use std::sync::Arc;

pub async fn setup() -> (PantryContext, Arc<InMemoryMessenger>) {
    let messenger = Arc::new(InMemoryMessenger::new());
    let ctx = PantryContext::create_inmemory(Config::default(), messenger.clone())
        .await
        .unwrap();
    (ctx, messenger)
}

/// Timestamp of a wall clock time in the default time zone
pub fn moscow_millis(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    chrono_tz::Europe::Moscow
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .timestamp_millis()
}

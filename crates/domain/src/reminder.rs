use crate::shared::entity::ID;
use crate::user::UserId;
use chrono_tz::Tz;
use std::fmt::Display;

/// The kinds of reminders a `Product` can have. At most one `ReminderJob`
/// per kind and product is pending at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReminderKind {
    Week,
    Day,
    Custom,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 3] = [ReminderKind::Week, ReminderKind::Day, ReminderKind::Custom];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Day => "1d",
            Self::Custom => "cust",
        }
    }

    /// How many calendar days before the expiration date this kind fires.
    /// `Custom` reminders fire at an absolute instant instead.
    pub fn days_before(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Day => Some(1),
            Self::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey {
    pub product_id: ID,
    pub kind: ReminderKind,
}

impl JobKey {
    pub fn new(product_id: ID, kind: ReminderKind) -> Self {
        Self { product_id, kind }
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.product_id, self.kind.code())
    }
}

/// A one shot notification derived from a `Product`. It is never persisted,
/// the pending set is rebuilt from the stored products on startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderJob {
    pub key: JobKey,
    /// The `User` which should receive `text`
    pub owner: UserId,
    /// Timestamp in millis at which the reminder should be delivered
    pub fires_at: i64,
    /// Rendered when the job is scheduled, not when it fires
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderSettings {
    pub timezone: Tz,
    /// Hour of the day (0..=23) at which day and week reminders are sent
    pub notify_hour: u32,
}

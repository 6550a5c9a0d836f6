use crate::date::local_at_hour;
use crate::reminder::{ReminderKind, ReminderSettings};
use crate::shared::entity::{Entity, ID};
use crate::user::UserId;
use chrono::prelude::*;
use chrono::Duration;

/// A perishable item tracked for a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ID,
    pub owner: UserId,
    pub name: String,
    /// Anchor instant in millis: the expiration date at the configured notification hour
    pub expiration: i64,
    pub notify_day_before: bool,
    pub notify_week_before: bool,
    /// Optional extra reminder at an instant chosen by the `User`
    pub custom_time: Option<i64>,
}

/// The data needed to store a new `Product`, the id is assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub owner: UserId,
    pub name: String,
    pub expiration: i64,
    pub notify_day_before: bool,
    pub notify_week_before: bool,
}

impl Product {
    /// When the reminder of the given kind should fire, if the `Product` has it enabled
    pub fn reminder_at(&self, kind: ReminderKind, settings: &ReminderSettings) -> Option<i64> {
        let days_before = match kind {
            ReminderKind::Custom => return self.custom_time,
            ReminderKind::Week if !self.notify_week_before => return None,
            ReminderKind::Day if !self.notify_day_before => return None,
            _ => kind.days_before()?,
        };

        let expiration = settings
            .timezone
            .timestamp_millis_opt(self.expiration)
            .single()?;
        let date = expiration
            .date_naive()
            .checked_sub_signed(Duration::days(days_before))?;

        local_at_hour(date, settings.notify_hour, &settings.timezone).map(|dt| dt.timestamp_millis())
    }

    /// Every enabled reminder of this `Product` together with the instant it fires at
    pub fn reminder_plan(&self, settings: &ReminderSettings) -> Vec<(ReminderKind, i64)> {
        ReminderKind::ALL
            .iter()
            .filter_map(|kind| self.reminder_at(*kind, settings).map(|ts| (*kind, ts)))
            .collect()
    }
}

impl Entity<ID> for Product {
    fn id(&self) -> ID {
        self.id
    }
}

/// The answer a `User` gives when asked how to be reminded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChoice {
    Day,
    Week,
    Both,
    Custom,
}

impl NotifyChoice {
    pub const ALL: [NotifyChoice; 4] = [
        NotifyChoice::Day,
        NotifyChoice::Week,
        NotifyChoice::Both,
        NotifyChoice::Custom,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Both => "both",
            Self::Custom => "custom",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    pub fn notify_day_before(&self) -> bool {
        matches!(self, Self::Day | Self::Both)
    }

    pub fn notify_week_before(&self) -> bool {
        matches!(self, Self::Week | Self::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Moscow;

    fn settings() -> ReminderSettings {
        ReminderSettings {
            timezone: Moscow,
            notify_hour: 9,
        }
    }

    fn millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Moscow
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn product(day: bool, week: bool, custom_time: Option<i64>) -> Product {
        Product {
            id: ID::new(1),
            owner: UserId::new(100),
            name: "Milk".into(),
            expiration: millis(2025, 6, 1, 9, 0),
            notify_day_before: day,
            notify_week_before: week,
            custom_time,
        }
    }

    #[test]
    fn plans_day_and_week_reminders_at_notify_hour() {
        let plan = product(true, true, None).reminder_plan(&settings());
        assert_eq!(
            plan,
            vec![
                (ReminderKind::Week, millis(2025, 5, 25, 9, 0)),
                (ReminderKind::Day, millis(2025, 5, 31, 9, 0)),
            ]
        );
    }

    #[test]
    fn plans_only_enabled_reminders() {
        let plan = product(false, true, None).reminder_plan(&settings());
        assert_eq!(plan, vec![(ReminderKind::Week, millis(2025, 5, 25, 9, 0))]);

        let plan = product(true, false, None).reminder_plan(&settings());
        assert_eq!(plan, vec![(ReminderKind::Day, millis(2025, 5, 31, 9, 0))]);
    }

    #[test]
    fn product_without_reminders_plans_nothing() {
        assert!(product(false, false, None)
            .reminder_plan(&settings())
            .is_empty());
    }

    #[test]
    fn custom_reminder_uses_its_own_instant() {
        let custom = millis(2025, 5, 15, 14, 30);
        let p = product(false, false, Some(custom));
        assert_eq!(
            p.reminder_plan(&settings()),
            vec![(ReminderKind::Custom, custom)]
        );
    }

    #[test]
    fn reminders_follow_configured_hour() {
        let settings = ReminderSettings {
            timezone: Moscow,
            notify_hour: 18,
        };
        let p = product(true, false, None);
        assert_eq!(
            p.reminder_at(ReminderKind::Day, &settings),
            Some(millis(2025, 5, 31, 18, 0))
        );
    }

    #[test]
    fn reminder_before_earliest_date_is_skipped() {
        let earliest = Moscow
            .from_local_datetime(&NaiveDate::MIN.and_hms_opt(9, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .timestamp_millis();
        let p = Product {
            expiration: earliest,
            ..product(true, true, None)
        };
        assert_eq!(p.reminder_at(ReminderKind::Day, &settings()), None);
        assert!(p.reminder_plan(&settings()).is_empty());
    }

    #[test]
    fn notify_choice_sets_flags() {
        assert!(NotifyChoice::Day.notify_day_before());
        assert!(!NotifyChoice::Day.notify_week_before());
        assert!(NotifyChoice::Week.notify_week_before());
        assert!(!NotifyChoice::Week.notify_day_before());
        assert!(NotifyChoice::Both.notify_day_before() && NotifyChoice::Both.notify_week_before());
        assert!(!NotifyChoice::Custom.notify_day_before());
        assert!(!NotifyChoice::Custom.notify_week_before());
    }

    #[test]
    fn notify_choice_codes() {
        assert_eq!(NotifyChoice::from_code("both"), Some(NotifyChoice::Both));
        assert_eq!(NotifyChoice::from_code("month"), None);
    }
}

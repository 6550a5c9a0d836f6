use crate::i18n::{escape_html, fill, lookup, Text};
use chrono_tz::Tz;
use pantry_reminder_domain::{format_date, Locale, Product, ReminderKind};

/// The message delivered when a reminder of the given kind fires.
/// Rendered once at schedule time.
pub fn render_reminder(product: &Product, kind: ReminderKind, locale: Locale, tz: &Tz) -> String {
    let name = escape_html(&product.name);
    match kind {
        ReminderKind::Week => fill(lookup(locale, Text::ReminderWeek), &[("name", &name)]),
        ReminderKind::Day => fill(lookup(locale, Text::ReminderDay), &[("name", &name)]),
        ReminderKind::Custom => fill(
            lookup(locale, Text::ReminderCustom),
            &[("name", &name), ("date", &format_date(product.expiration, tz))],
        ),
    }
}

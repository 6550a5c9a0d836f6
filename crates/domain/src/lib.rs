mod chat;
mod conversation;
mod date;
mod product;
mod reminder;
mod shared;
mod user;

pub use chat::{Button, Command, InboundEvent, Keyboard};
pub use conversation::{ConversationSession, ConversationState, ProductDraft};
pub use date::{
    format_date, format_short_datetime, local_at_hour, parse_custom_time,
    parse_expiration, DateParseError,
};
pub use product::{NewProduct, NotifyChoice, Product};
pub use reminder::{JobKey, ReminderJob, ReminderKind, ReminderSettings};
pub use shared::entity::{Entity, ID};
pub use user::{Locale, User, UserId};

mod recover_reminders;
mod render;
mod schedule;

pub use recover_reminders::RecoverRemindersUseCase;
pub use render::render_reminder;
pub use schedule::{reminder_jobs, schedule_reminders};

use crate::conversation::handle_event;
use actix_web::rt::time::sleep;
use futures::future::join_all;
use pantry_reminder_domain::UserId;
use pantry_reminder_infra::{IncomingUpdate, PantryContext, TelegramBotApi};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long polls the bot api forever and feeds every update into the conversation
pub fn start_update_poller(ctx: PantryContext, bot: Arc<TelegramBotApi>) {
    actix_web::rt::spawn(async move {
        info!("Listening for chat updates");
        let mut offset = 0;
        loop {
            match bot.get_updates(offset).await {
                Ok((last_update_id, updates)) => {
                    if let Some(update_id) = last_update_id {
                        offset = update_id + 1;
                    }
                    dispatch_updates(&ctx, &bot, updates).await;
                }
                Err(e) => {
                    warn!("Polling for chat updates failed. Err: {:?}", e);
                    sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    });
}

/// Splits a batch into per user batches, keeping the order of each user's updates
pub fn group_by_user(updates: Vec<IncomingUpdate>) -> Vec<Vec<IncomingUpdate>> {
    let mut users: Vec<UserId> = Vec::new();
    let mut batches: Vec<Vec<IncomingUpdate>> = Vec::new();
    for update in updates {
        match users.iter().position(|user_id| *user_id == update.user_id) {
            Some(i) => batches[i].push(update),
            None => {
                users.push(update.user_id);
                batches.push(vec![update]);
            }
        }
    }
    batches
}

async fn dispatch_updates(ctx: &PantryContext, bot: &TelegramBotApi, updates: Vec<IncomingUpdate>) {
    let batches = group_by_user(updates).into_iter().map(|updates| async move {
        for update in updates {
            if let Some(callback_query_id) = &update.callback_query_id {
                if let Err(e) = bot.answer_callback_query(callback_query_id).await {
                    warn!("Unable to acknowledge button press. Err: {:?}", e);
                }
            }
            // Failures are reported to the user and logged by the conversation
            let _ = handle_event(ctx, update.user_id, update.event).await;
        }
    });
    join_all(batches).await;
}

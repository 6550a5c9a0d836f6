mod types;

use super::IMessenger;
use pantry_reminder_domain::{Keyboard, UserId};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::error;
pub use types::IncomingUpdate;
use types::*;

/// Minimal client for the Telegram Bot API: long polling for updates and
/// sending messages.
pub struct TelegramBotApi {
    client: Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramBotApi {
    pub fn new(api_url: &str, bot_token: &str, poll_timeout_secs: u64) -> anyhow::Result<Self> {
        // The http timeout has to outlive the long poll
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs.saturating_add(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            poll_timeout_secs,
        })
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let res = match self
            .client
            .post(&format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Telegram API {} error. Error message: {:?}",
                    method, e
                );
                return Err(anyhow::Error::new(e));
            }
        };

        let res = res.json::<TelegramResponse<T>>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Telegram API {} error. Error message: {:?}",
                method, e
            );
            anyhow::Error::new(e)
        })?;

        match (res.ok, res.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(anyhow::anyhow!(
                "Telegram API {} was rejected: {}",
                method,
                res.description.unwrap_or_default()
            )),
        }
    }

    /// Long polls for updates newer than `offset`. Updates the bot cannot
    /// react to are dropped, their ids are still reported so that the
    /// caller can advance its offset.
    pub async fn get_updates(
        &self,
        offset: i64,
    ) -> anyhow::Result<(Option<i64>, Vec<IncomingUpdate>)> {
        let body = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: vec!["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        let last_update_id = updates.iter().map(|u| u.update_id).max();
        let incoming = updates
            .into_iter()
            .filter_map(Update::into_incoming)
            .collect();
        Ok((last_update_id, incoming))
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> anyhow::Result<()> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            reply_markup: keyboard.map(ReplyMarkup::from),
        };
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> anyhow::Result<()> {
        let body = AnswerCallbackQueryRequest { callback_query_id };
        let _: bool = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IMessenger for TelegramBotApi {
    async fn send(
        &self,
        user_id: UserId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> anyhow::Result<()> {
        self.send_message(user_id.inner(), text, keyboard).await
    }
}

use pantry_reminder_domain::{Command, InboundEvent, Keyboard, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TelegramUser,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// An `Update` resolved to the user it belongs to and the event it carries
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingUpdate {
    pub update_id: i64,
    pub user_id: UserId,
    pub event: InboundEvent,
    /// Set for button presses, which must be acknowledged
    pub callback_query_id: Option<String>,
}

impl Update {
    /// Returns `None` for updates that carry nothing the bot reacts to,
    /// such as stickers or edited messages.
    pub fn into_incoming(self) -> Option<IncomingUpdate> {
        let update_id = self.update_id;
        if let Some(query) = self.callback_query {
            let data = query.data?;
            return Some(IncomingUpdate {
                update_id,
                user_id: UserId::new(query.from.id),
                event: InboundEvent::Button(data),
                callback_query_id: Some(query.id),
            });
        }

        let message = self.message?;
        let text = message.text?;
        let user_id = message
            .from
            .map(|user| user.id)
            .unwrap_or(message.chat.id);
        let event = match Command::parse(&text) {
            Some(command) => InboundEvent::Command(command),
            None => InboundEvent::Text(text),
        };
        Some(IncomingUpdate {
            update_id,
            user_id: UserId::new(user_id),
            event,
            callback_query_id: None,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
    },
    Inline {
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
    Remove {
        remove_keyboard: bool,
    },
}

impl From<Keyboard> for ReplyMarkup {
    fn from(keyboard: Keyboard) -> Self {
        match keyboard {
            Keyboard::Menu(labels) => Self::Keyboard {
                keyboard: labels
                    .into_iter()
                    .map(|text| vec![KeyboardButton { text }])
                    .collect(),
                resize_keyboard: true,
            },
            Keyboard::Inline(rows) => Self::Inline {
                inline_keyboard: rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|button| InlineKeyboardButton {
                                text: button.label,
                                callback_data: button.data,
                            })
                            .collect()
                    })
                    .collect(),
            },
            Keyboard::Remove => Self::Remove {
                remove_keyboard: true,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_reminder_domain::Button;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Option<IncomingUpdate> {
        serde_json::from_value::<Update>(value).unwrap().into_incoming()
    }

    #[test]
    fn it_maps_commands_and_text() {
        let command = parse(json!({
            "update_id": 10,
            "message": {
                "message_id": 1,
                "from": { "id": 42, "is_bot": false, "first_name": "A" },
                "chat": { "id": 42, "type": "private" },
                "text": "/add"
            }
        }))
        .unwrap();
        assert_eq!(command.update_id, 10);
        assert_eq!(command.user_id, UserId::new(42));
        assert_eq!(command.event, InboundEvent::Command(Command::Add));
        assert!(command.callback_query_id.is_none());

        let text = parse(json!({
            "update_id": 11,
            "message": {
                "message_id": 2,
                "chat": { "id": 7, "type": "private" },
                "text": "Milk"
            }
        }))
        .unwrap();
        assert_eq!(text.user_id, UserId::new(7));
        assert_eq!(text.event, InboundEvent::Text("Milk".into()));
    }

    #[test]
    fn it_maps_button_presses() {
        let update = parse(json!({
            "update_id": 12,
            "callback_query": {
                "id": "abc",
                "from": { "id": 42, "is_bot": false, "first_name": "A" },
                "chat_instance": "1",
                "data": "notify_both"
            }
        }))
        .unwrap();
        assert_eq!(update.event, InboundEvent::Button("notify_both".into()));
        assert_eq!(update.callback_query_id.as_deref(), Some("abc"));
    }

    #[test]
    fn it_ignores_updates_without_text() {
        assert!(parse(json!({
            "update_id": 13,
            "message": {
                "message_id": 3,
                "chat": { "id": 7, "type": "private" },
                "sticker": {}
            }
        }))
        .is_none());
        assert!(parse(json!({ "update_id": 14, "edited_message": {} })).is_none());
    }

    #[test]
    fn it_serializes_keyboards() {
        let menu = serde_json::to_value(ReplyMarkup::from(Keyboard::Menu(vec![
            "Add".into(),
            "List".into(),
        ])))
        .unwrap();
        assert_eq!(
            menu,
            json!({
                "keyboard": [[{ "text": "Add" }], [{ "text": "List" }]],
                "resize_keyboard": true
            })
        );

        let inline = serde_json::to_value(ReplyMarkup::from(Keyboard::Inline(vec![vec![
            Button::new("1 day", "notify_day"),
        ]])))
        .unwrap();
        assert_eq!(
            inline,
            json!({
                "inline_keyboard": [[{ "text": "1 day", "callback_data": "notify_day" }]]
            })
        );

        let remove = serde_json::to_value(ReplyMarkup::from(Keyboard::Remove)).unwrap();
        assert_eq!(remove, json!({ "remove_keyboard": true }));
    }

    #[test]
    fn send_message_omits_missing_markup() {
        let body = serde_json::to_value(SendMessageRequest {
            chat_id: 1,
            text: "hi",
            parse_mode: "HTML",
            reply_markup: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "chat_id": 1, "text": "hi", "parse_mode": "HTML" })
        );
    }
}

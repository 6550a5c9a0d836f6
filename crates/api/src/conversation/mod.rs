mod menus;

use crate::error::ConversationError;
use crate::i18n::{lookup, Text, INVALID_INPUT_MARKER};
use crate::product::attach_custom_time::{self, AttachCustomTimeUseCase};
use crate::product::create_product::CreateProductUseCase;
use crate::product::list_products::{render_product_list, ListProductsUseCase};
use crate::shared::usecase::execute;
use crate::user::set_language::SetLanguageUseCase;
use menus::{
    command_for_label, language_menu, main_menu, notify_menu, LANGUAGE_PREFIX, NOTIFY_PREFIX,
};
use pantry_reminder_domain::{
    parse_custom_time, parse_expiration, Command, ConversationSession, ConversationState,
    InboundEvent, Keyboard, Locale, NotifyChoice, UserId,
};
use pantry_reminder_infra::PantryContext;
use tracing::{debug, warn};

/// Longest product name accepted at intake
const MAX_NAME_CHARS: usize = 256;

/// A message sent back to the user
#[derive(Debug, Clone, PartialEq)]
struct Reply {
    text: String,
    keyboard: Option<Keyboard>,
}

impl Reply {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Feeds one inbound event of a user through the conversation and returns the
/// state the session ended up in.
///
/// Events of the same user are handled one at a time, the session lock is held
/// until the replies are handed to the messenger. If a step fails the session
/// keeps the state it had before the event and the user gets a failure notice.
#[tracing::instrument(name = "Handling conversation event", skip(ctx))]
pub async fn handle_event(
    ctx: &PantryContext,
    user_id: UserId,
    event: InboundEvent,
) -> Result<ConversationState, ConversationError> {
    let mut session = ctx.sessions.lock(user_id).await;
    let mut conversation = Conversation {
        ctx,
        user_id,
        locale: ctx.locales.get(user_id),
        session: (*session).clone(),
    };

    let (replies, res) = match conversation.handle(event).await {
        Ok(replies) => {
            *session = conversation.session;
            (replies, Ok(session.state))
        }
        Err(e) => {
            warn!(
                "Conversation step of user {} failed, keeping state {:?}. Err: {:?}",
                user_id, session.state, e
            );
            let failure = Reply::new(lookup(conversation.locale, Text::Failure));
            (vec![failure], Err(e))
        }
    };

    for reply in replies {
        if let Err(e) = ctx.messenger.send(user_id, &reply.text, reply.keyboard).await {
            warn!("Unable to reply to user {}. Err: {:?}", user_id, e);
        }
    }
    ctx.sessions.release(user_id, session);

    res
}

/// Working copy of a session while an event is processed
struct Conversation<'a> {
    ctx: &'a PantryContext,
    user_id: UserId,
    locale: Locale,
    session: ConversationSession,
}

impl<'a> Conversation<'a> {
    fn text(&self, key: Text) -> &'static str {
        lookup(self.locale, key)
    }

    fn invalid_input(&self, prompt: Text) -> Reply {
        Reply::new(format!("{}{}", INVALID_INPUT_MARKER, self.text(prompt)))
    }

    fn language_prompt(&self) -> Reply {
        Reply::new(self.text(Text::ChooseLanguage)).with_keyboard(language_menu())
    }

    fn notify_prompt(&self) -> Reply {
        Reply::new(self.text(Text::AskNotify)).with_keyboard(notify_menu(self.locale))
    }

    fn menu_reply(&self, key: Text) -> Reply {
        Reply::new(self.text(key)).with_keyboard(main_menu(self.locale))
    }

    /// Drops an intake whose draft lost the data the current step depends on
    fn abandon_intake(&mut self) -> Vec<Reply> {
        debug!(
            "Abandoning incomplete intake of user {} in state {:?}",
            self.user_id, self.session.state
        );
        self.session.reset();
        vec![self.menu_reply(Text::Failure)]
    }

    async fn handle(&mut self, event: InboundEvent) -> Result<Vec<Reply>, ConversationError> {
        match event {
            InboundEvent::Command(command) => self.on_command(command).await,
            InboundEvent::Button(data) => self.on_button(&data).await,
            InboundEvent::Text(text) => match command_for_label(self.locale, &text) {
                Some(command) => self.on_command(command).await,
                None => self.on_text(text.trim()).await,
            },
        }
    }

    async fn on_command(&mut self, command: Command) -> Result<Vec<Reply>, ConversationError> {
        let reply = match command {
            Command::Start => {
                self.session.restart_at(ConversationState::ChoosingLanguage);
                self.language_prompt()
            }
            Command::Language => self.language_prompt(),
            Command::Add => {
                self.session.restart_at(ConversationState::AwaitingName);
                Reply::new(self.text(Text::AskName)).with_keyboard(Keyboard::Remove)
            }
            Command::List => {
                let usecase = ListProductsUseCase {
                    owner: self.user_id,
                };
                let products = execute(usecase, self.ctx).await?;
                let mut replies = render_product_list(&products, self.locale, &self.ctx.config.timezone)
                    .into_iter()
                    .map(Reply::new)
                    .collect::<Vec<_>>();
                if let Some(last) = replies.pop() {
                    replies.push(last.with_keyboard(main_menu(self.locale)));
                }
                return Ok(replies);
            }
            Command::Help => self.menu_reply(Text::Help),
        };
        Ok(vec![reply])
    }

    async fn on_button(&mut self, data: &str) -> Result<Vec<Reply>, ConversationError> {
        if let Some(code) = data.strip_prefix(LANGUAGE_PREFIX) {
            if let Some(locale) = Locale::from_code(code) {
                return self.set_language(locale).await;
            }
        }

        if let Some(code) = data.strip_prefix(NOTIFY_PREFIX) {
            if let (ConversationState::AwaitingNotifyChoice, Some(choice)) =
                (self.session.state, NotifyChoice::from_code(code))
            {
                return self.create_product(choice).await;
            }
        }

        debug!(
            "Ignoring button {} of user {} in state {:?}",
            data, self.user_id, self.session.state
        );
        Ok(Vec::new())
    }

    async fn on_text(&mut self, text: &str) -> Result<Vec<Reply>, ConversationError> {
        let reply = match self.session.state {
            ConversationState::Idle => self.menu_reply(Text::Help),
            ConversationState::ChoosingLanguage => self.language_prompt(),
            ConversationState::AwaitingName => {
                if text.is_empty() || text.chars().count() > MAX_NAME_CHARS {
                    self.invalid_input(Text::AskName)
                } else {
                    self.session.draft.name = Some(text.to_string());
                    self.session.state = ConversationState::AwaitingExpiration;
                    Reply::new(self.text(Text::AskExpiration))
                }
            }
            ConversationState::AwaitingExpiration => {
                match parse_expiration(text, &self.ctx.config.reminder_settings()) {
                    Ok(expiration) => {
                        self.session.draft.expiration = Some(expiration);
                        self.session.state = ConversationState::AwaitingNotifyChoice;
                        self.notify_prompt()
                    }
                    Err(e) => {
                        debug!("Rejected expiration of user {}: {}", self.user_id, e);
                        self.invalid_input(Text::AskExpiration)
                    }
                }
            }
            ConversationState::AwaitingNotifyChoice => self.notify_prompt(),
            ConversationState::AwaitingCustomTime => {
                match parse_custom_time(text, &self.ctx.config.timezone) {
                    Ok(custom_time) => return self.attach_custom_time(custom_time).await,
                    Err(e) => {
                        debug!("Rejected custom time of user {}: {}", self.user_id, e);
                        self.invalid_input(Text::AskCustomTime)
                    }
                }
            }
        };
        Ok(vec![reply])
    }

    async fn set_language(&mut self, locale: Locale) -> Result<Vec<Reply>, ConversationError> {
        let usecase = SetLanguageUseCase {
            user_id: self.user_id,
            locale,
        };
        execute(usecase, self.ctx).await?;

        self.locale = locale;
        if self.session.state == ConversationState::ChoosingLanguage {
            self.session.reset();
        }
        Ok(vec![self.menu_reply(Text::Welcome)])
    }

    async fn create_product(
        &mut self,
        choice: NotifyChoice,
    ) -> Result<Vec<Reply>, ConversationError> {
        let (name, expiration) = match (&self.session.draft.name, self.session.draft.expiration) {
            (Some(name), Some(expiration)) => (name.clone(), expiration),
            _ => return Ok(self.abandon_intake()),
        };

        let usecase = CreateProductUseCase {
            owner: self.user_id,
            name,
            expiration,
            choice,
        };
        let product = execute(usecase, self.ctx).await?;

        if choice == NotifyChoice::Custom {
            self.session.draft.product_id = Some(product.id);
            self.session.state = ConversationState::AwaitingCustomTime;
            return Ok(vec![Reply::new(self.text(Text::AskCustomTime))]);
        }

        self.session.reset();
        Ok(vec![self.menu_reply(Text::Added)])
    }

    async fn attach_custom_time(&mut self, custom_time: i64) -> Result<Vec<Reply>, ConversationError> {
        let product_id = match self.session.draft.product_id {
            Some(product_id) => product_id,
            None => return Ok(self.abandon_intake()),
        };

        let usecase = AttachCustomTimeUseCase {
            owner: self.user_id,
            product_id,
            custom_time,
        };
        match execute(usecase, self.ctx).await {
            Ok(_) => {
                self.session.reset();
                Ok(vec![self.menu_reply(Text::CustomAdded)])
            }
            Err(attach_custom_time::UseCaseError::NotFound(_)) => Ok(self.abandon_intake()),
            Err(e) => Err(e.into()),
        }
    }
}

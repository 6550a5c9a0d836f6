use crate::error::ConversationError;
use crate::i18n::{escape_html, fill, lookup, Text};
use crate::shared::usecase::UseCase;
use chrono_tz::Tz;
use pantry_reminder_domain::{format_date, format_short_datetime, Locale, Product, UserId};
use pantry_reminder_infra::PantryContext;
use tracing::error;

#[derive(Debug)]
pub struct ListProductsUseCase {
    pub owner: UserId,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ConversationError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::Storage(ListProductsUseCase::NAME),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListProductsUseCase {
    type Response = Vec<Product>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListProducts";

    async fn execute(&mut self, ctx: &PantryContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .products
            .find_by_owner(self.owner)
            .await
            .map_err(|e| {
                error!("Unable to list products of user {}. Err: {:?}", self.owner, e);
                UseCaseError::StorageError
            })
    }
}

/// Longest message Telegram accepts, in UTF-16 code units
const MESSAGE_LENGTH_LIMIT: usize = 4096;

/// One line per product in creation order, split into as many messages as
/// needed to stay within the message length limit.
pub fn render_product_list(products: &[Product], locale: Locale, tz: &Tz) -> Vec<String> {
    if products.is_empty() {
        return vec![lookup(locale, Text::ListEmpty).to_string()];
    }

    let mut messages = Vec::new();
    let mut message = String::new();
    let mut length = 0;
    for entry in products.iter().map(|product| render_entry(product, locale, tz)) {
        let entry_length = entry.encode_utf16().count();
        if length > 0 && length + 1 + entry_length > MESSAGE_LENGTH_LIMIT {
            messages.push(std::mem::take(&mut message));
            length = 0;
        }
        if length > 0 {
            message.push('\n');
            length += 1;
        }
        message.push_str(&entry);
        length += entry_length;
    }
    messages.push(message);
    messages
}

fn render_entry(product: &Product, locale: Locale, tz: &Tz) -> String {
    let mut options = Vec::new();
    if product.notify_day_before {
        options.push(lookup(locale, Text::OptionDay).to_string());
    }
    if product.notify_week_before {
        options.push(lookup(locale, Text::OptionWeek).to_string());
    }
    if let Some(custom_time) = product.custom_time {
        options.push(fill(
            lookup(locale, Text::OptionCustom),
            &[("date", &format_short_datetime(custom_time, tz))],
        ));
    }
    let options = if options.is_empty() {
        "—".to_string()
    } else {
        options.join(", ")
    };

    fill(
        lookup(locale, Text::ListEntry),
        &[
            ("name", &escape_html(&product.name)),
            ("date", &format_date(product.expiration, tz)),
            ("options", &options),
        ],
    )
}

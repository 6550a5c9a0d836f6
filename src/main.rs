mod telemetry;

use pantry_reminder_api::Application;
use pantry_reminder_infra::{setup_context, Config, TelegramBotApi};
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("pantry_reminder".into(), "info".into());
    init_subscriber(subscriber);

    let config = Config::from_env()?;
    let bot = Arc::new(TelegramBotApi::new(
        &config.telegram_api_url,
        &config.bot_token,
        config.poll_timeout_secs,
    )?);
    let context = setup_context(config, bot.clone()).await?;

    let app = Application::new(context).await?;
    app.listen_for_updates(bot);
    app.start().await?;
    Ok(())
}

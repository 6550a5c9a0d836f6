mod conversation;
mod error;
mod i18n;
mod job_schedulers;
mod product;
mod reminder;
mod shared;
mod status;
mod user;

use actix_web::{dev::Server, web, App, HttpServer};
pub use conversation::handle_event;
pub use error::ConversationError;
use job_schedulers::start_update_poller;
use pantry_reminder_infra::{PantryContext, TelegramBotApi};
use reminder::RecoverRemindersUseCase;
use shared::usecase::execute;
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    context: PantryContext,
}

impl Application {
    /// Recovers the pending reminders, starts delivering them and binds the
    /// liveness server. Chat updates are only consumed after `listen_for_updates`.
    pub async fn new(context: PantryContext) -> anyhow::Result<Self> {
        let recovered = execute(RecoverRemindersUseCase, &context)
            .await
            .map_err(|e| anyhow::anyhow!("Unable to recover reminders: {:?}", e))?;
        context.scheduler.start(context.messenger.clone());
        info!("Scheduler started with {} recovered reminders", recovered);

        let (server, port) = Application::configure_server(context.clone())?;

        Ok(Self {
            server,
            port,
            context,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn listen_for_updates(&self, bot: Arc<TelegramBotApi>) {
        start_update_poller(self.context.clone(), bot);
    }

    fn configure_server(context: PantryContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Liveness server listening on port {}", port);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(1)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

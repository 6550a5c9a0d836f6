use pantry_reminder_api::Application;
use pantry_reminder_infra::{Config, InMemoryMessenger, PantryContext, Repos};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub ctx: PantryContext,
    pub messenger: Arc<InMemoryMessenger>,
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    spawn_app_with_repos(Repos::create_inmemory()).await
}

/// Launch the application on top of already populated repositories, as after a restart
pub async fn spawn_app_with_repos(repos: Repos) -> TestApp {
    let config = Config {
        port: 0, // Random port
        ..Default::default()
    };
    let messenger = Arc::new(InMemoryMessenger::new());
    let ctx = PantryContext::create(
        repos,
        config,
        Arc::new(pantry_reminder_infra::RealSys {}),
        messenger.clone(),
    )
    .await
    .expect("Failed to build context.");

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        ctx,
        messenger,
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use affiliate_rewards::infrastructure::AppState;
use affiliate_rewards::{config, db, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "affiliate_rewards=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if config.strict_values {
        tracing::info!("Strict value parsing enabled: non-numeric rewards are rejected");
    }

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    let state = AppState::new(db, &config);
    let app = server::build_router(state, &config.cors_allowed_origins);

    server::serve(app, config.port)
        .await
        .expect("Failed to start server");
}

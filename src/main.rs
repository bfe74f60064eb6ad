//! pizza-bot server.
//!
//! Configuration comes from `PIZZA_BOT__*` environment variables (see
//! `pizza_bot::config`). `RUST_LOG` overrides the configured log filter.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pizza_bot::adapters::http::{app_router, BotHandlers};
use pizza_bot::adapters::luis::{LuisClassifier, LuisConfig};
use pizza_bot::adapters::postgres::{self, PostgresConversationLog, PostgresOrderStore};
use pizza_bot::adapters::qna_maker::{QnaMakerConfig, QnaMakerResolver};
use pizza_bot::adapters::redis::{self as redis_adapter, RedisPriceCache, RedisStateStore};
use pizza_bot::application::{DialogPorts, TurnDispatcher};
use pizza_bot::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting pizza-bot"
    );

    let pool = postgres::connect(&config.database).await?;
    tracing::info!("Connected to database");
    if config.database.run_migrations {
        postgres::run_migrations(&pool, Path::new(&config.database.migrations_dir)).await?;
    }

    let redis_conn = tokio::time::timeout(
        config.redis.timeout(),
        redis_adapter::connect(&config.redis.url),
    )
    .await
    .map_err(|_| "timed out connecting to redis")??;
    tracing::info!("Connected to redis");

    let classifier = LuisClassifier::new(
        LuisConfig::new(
            &config.nlu.endpoint,
            &config.nlu.app_id,
            config.nlu.subscription_key(),
        )
        .with_timeout(config.nlu.timeout()),
    )?;
    let qna = QnaMakerResolver::new(
        QnaMakerConfig::new(&config.qna.endpoint, config.qna.endpoint_key())
            .with_timeout(config.qna.timeout())
            .with_top(config.qna.top),
    )?;
    let state = RedisStateStore::new(redis_conn.clone(), &config.redis.state_key_prefix);

    let ports = DialogPorts {
        classifier: Arc::new(classifier),
        qna: Arc::new(qna),
        profiles: Arc::new(state.clone()),
        dialogs: Arc::new(state),
        conversation_log: Arc::new(PostgresConversationLog::new(pool.clone())),
        prices: Arc::new(RedisPriceCache::new(redis_conn, &config.redis.price_key_prefix)),
        orders: Arc::new(PostgresOrderStore::new(pool.clone())),
    };
    let dispatcher = Arc::new(TurnDispatcher::new(ports, config.bot.settings()));
    let app = app_router(BotHandlers::new(dispatcher), config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#![forbid(unsafe_code)]

mod bus;
mod commands;
mod error_handler;
mod repository;
mod steam;
mod utils;

use std::{process::exit, sync::Arc};

use bus::{MqttBus, Router};
use repository::{UserRepository, UserStore};
use reqwest::Url;
use serde::Deserialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use steam::{ReqwestTransport, SteamClient};
use tokio::select;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default = "default_prefix")]
    prefix: String,
    #[serde(default = "default_broker")]
    broker: String,
    steam_api_key: String,
    #[serde(default = "default_kv_path")]
    steam_kv_path: String,
    #[serde(default = "default_api_url")]
    steam_api_url: String,
}

fn default_prefix() -> String {
    ".".to_string()
}

fn default_broker() -> String {
    "localhost:1883".to_string()
}

fn default_kv_path() -> String {
    "kv.db".to_string()
}

fn default_api_url() -> String {
    steam::DEFAULT_API_URL.to_string()
}

pub struct BotState {
    pub steam: SteamClient,
    pub user_repository: Arc<dyn UserStore>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        warn!("Could not load config from .env file: {err}");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    "steam_plugin=info"
                        .parse()
                        .expect("Hard-coded default directive should be correct"),
                )
                .from_env_lossy(),
        )
        .init();

    info!("Steam plugin starting");

    let app_config = match envy::prefixed("GOWON_").from_env::<AppConfig>() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load app config: {err}");
            exit(255);
        }
    };

    let api_url = match Url::parse(&app_config.steam_api_url) {
        Ok(url) => url,
        Err(err) => {
            error!("Invalid steam api url {}: {err}", app_config.steam_api_url);
            exit(255);
        }
    };

    let http_client = match reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            error!("Could not create the http client: {err}");
            exit(255);
        }
    };

    let db_pool = match setup_database(&app_config.steam_kv_path).await {
        Ok(pool) => pool,
        Err(err) => {
            error!("Could not setup database: {err}");
            exit(255);
        }
    };

    let bus = match MqttBus::new(&app_config.broker) {
        Ok(bus) => bus,
        Err(err) => {
            error!("Could not configure the message bus: {err:#}");
            exit(255);
        }
    };

    let state = BotState {
        steam: SteamClient::new(
            Arc::new(ReqwestTransport::new(http_client)),
            app_config.steam_api_key,
            api_url,
        ),
        user_repository: Arc::new(UserRepository::new(db_pool.clone())),
    };

    let router = Arc::new(Router::new(app_config.prefix, Arc::new(state)));
    let mqtt_client = bus.client();

    select! {
        _ = shutdown_signal() => {
            info!("Signal caught, exiting");
            if let Err(err) = mqtt_client.disconnect().await {
                warn!("Could not disconnect from broker: {err}");
            }
            db_pool.close().await;
            info!("Shutdown complete");
        },

        result = bus.run(router) => {
            if let Err(err) = result {
                error!("Message bus failed: {err:#}");
            }
        },
    };
}

#[tracing::instrument]
async fn setup_database(path: &str) -> anyhow::Result<SqlitePool> {
    info!("Opening SQLite database at {path}");
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    info!("Running migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Done!");
    Ok(pool)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
                return;
            }
            Err(err) => warn!("Could not listen for SIGTERM: {err}"),
        }
    }

    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}

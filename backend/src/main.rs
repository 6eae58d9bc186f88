//! Backend entry-point: configuration, migrations, and server start-up.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use reqwest::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, TextGenSettings, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TEXTGEN_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TEXTGEN_MODEL: &str = "gemini-2.0-flash";

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn textgen_settings() -> std::io::Result<TextGenSettings> {
    let base = env::var("TEXTGEN_ENDPOINT").unwrap_or_else(|_| DEFAULT_TEXTGEN_ENDPOINT.into());
    let model = env::var("TEXTGEN_MODEL").unwrap_or_else(|_| DEFAULT_TEXTGEN_MODEL.into());
    let endpoint = Url::parse(&format!(
        "{base}/{model}:generateContent",
        base = base.trim_end_matches('/')
    ))
    .map_err(|e| std::io::Error::other(format!("invalid TEXTGEN_ENDPOINT: {e}")))?;
    Ok(TextGenSettings {
        endpoint,
        api_key: env::var("TEXTGEN_API_KEY").ok(),
    })
}

/// Run embedded migrations over a blocking sync connection.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut connection = PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("database connection: {e}")))?;
        connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations: {e}")))?;
        Ok::<_, std::io::Error>(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task: {e}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url =
        env::var("DATABASE_URL").map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    run_migrations(database_url.clone()).await?;

    let db_pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let config = ServerConfig::new(key, cookie_secure, bind_addr, db_pool, textgen_settings()?);

    info!(%bind_addr, "starting server");
    create_server(config)?.await
}

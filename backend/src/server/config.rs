//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use reqwest::Url;

use crate::outbound::persistence::DbPool;

/// Settings for the outbound text-generation adapter.
#[derive(Clone)]
pub struct TextGenSettings {
    /// Fully resolved `generateContent` endpoint URL.
    pub endpoint: Url,
    /// API key sent with every request, if the endpoint requires one.
    pub api_key: Option<String>,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) textgen: TextGenSettings,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        db_pool: DbPool,
        textgen: TextGenSettings,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool,
            textgen,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

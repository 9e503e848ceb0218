// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str =
    "checktruck=debug,tower_http=info,sqlx=warn,tower_sessions=info";

// A chave de assinatura dos cookies exige pelo menos 64 bytes
const MIN_SESSION_SECRET_LEN: usize = 64;

/// Configuração lida do ambiente (e do ficheiro `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let session_secret = env::var("SESSION_SECRET")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self::from_parts(database_url, session_secret, &bind_addr)
    }

    fn from_parts(database_url: String, session_secret: String, bind_addr: &str) -> AppResult<Self> {
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::ConfigError(format!(
                "SESSION_SECRET deve ter pelo menos {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigError(format!("BIND_ADDR inválido '{}': {}", bind_addr, e)))?;

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
        })
    }
}

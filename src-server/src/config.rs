use std::{net::SocketAddr, time::Duration};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub jwt_secret: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("HB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid HB_LISTEN_ADDR");
        let db_path = std::env::var("HB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let jwt_secret =
            std::env::var("HB_JWT_SECRET").unwrap_or_else(|_| Self::generate_secret());
        let cors_allow = std::env::var("HB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("HB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            db_path,
            jwt_secret,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Fallback when no secret is configured; tokens do not survive a
    /// restart in that case.
    fn generate_secret() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}

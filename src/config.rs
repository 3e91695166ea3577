// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// Directory holding the static quiz definition files.
    pub quiz_dir: String,
    pub demo_username: Option<String>,
    pub demo_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let quiz_dir = env::var("QUIZ_DIR").unwrap_or_else(|_| "data".to_string());

        let demo_username = env::var("DEMO_USERNAME").ok();
        let demo_password = env::var("DEMO_PASSWORD").ok();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            quiz_dir,
            demo_username,
            demo_password,
        }
    }
}

use std::env;

use crate::password::PasswordHashing;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storefront.db?mode=rwc".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        Ok(Self {
            port,
            database_url,
            host,
            argon2_memory_kib: env_u32("ARGON2_MEMORY_KIB", argon2::Params::DEFAULT_M_COST),
            argon2_iterations: env_u32("ARGON2_ITERATIONS", argon2::Params::DEFAULT_T_COST),
            argon2_parallelism: env_u32("ARGON2_PARALLELISM", argon2::Params::DEFAULT_P_COST),
        })
    }

    pub fn password_hashing(&self) -> anyhow::Result<PasswordHashing> {
        PasswordHashing::new(
            self.argon2_memory_kib,
            self.argon2_iterations,
            self.argon2_parallelism,
        )
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

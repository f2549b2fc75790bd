use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, Version,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::error::{AppError, AppResult};

/// Argon2id hashing with tunable cost.
#[derive(Debug, Clone, Default)]
pub struct PasswordHashing {
    params: Params,
}

impl PasswordHashing {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> anyhow::Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Returns a PHC string carrying the salt and parameters. The hashing
    /// itself runs on the blocking pool.
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let hashing = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hashing.hash_blocking(&password))
            .await
            .map_err(|e| AppError::Internal(e.into()))?
    }

    pub async fn verify(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let hashing = self.clone();
        let (password, stored_hash) = (password.to_owned(), stored_hash.to_owned());
        tokio::task::spawn_blocking(move || hashing.verify_blocking(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(e.into()))?
    }

    fn hash_blocking(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();
        Ok(hash)
    }

    fn verify_blocking(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

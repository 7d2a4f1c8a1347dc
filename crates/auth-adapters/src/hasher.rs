use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use domains::{DomainError, OtpHasher, Result};
use secrecy::{ExposeSecret, SecretString};

/// Stores login codes as salted Argon2 PHC strings.
#[derive(Default)]
pub struct Argon2OtpHasher {
    argon: Argon2<'static>,
}

impl Argon2OtpHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OtpHasher for Argon2OtpHasher {
    fn hash(&self, code: &SecretString) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(code.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Internal(format!("otp hashing failed: {e}")))
    }

    fn verify(&self, code: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        self.argon
            .verify_password(code.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::user as user_repo;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

/// The outcome of a registration attempt that passed validation.
pub enum RegisterOutcome {
    /// The user record was created.
    Created(User),
    /// A record with this email already exists; nothing was written.
    DuplicateEmail,
}

/// The outcome of a login attempt that passed validation.
pub enum LoginOutcome {
    /// Credentials matched.
    Success(User),
    /// No record for this email.
    UserNotFound,
    /// The record exists but the password did not match.
    WrongPassword,
}

/// Hashes a password using Argon2id with a fixed cost.
fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AppError::Hashing(format!("Failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Hashing(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Hashing(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Hashing(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    Ok(password_hash)
}

/// Verifies a plaintext candidate against a stored hash.
///
/// The comparison inside the verifier is constant-time.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Hashing(format!("Hash parse error: {}", e)))?;
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Registers a new user.
///
/// Duplicate detection is a find-before-insert check, not a storage
/// constraint, so the plaintext is only hashed once the email is known
/// to be unused.
pub async fn register(
    db: &Pool,
    name: String,
    email: String,
    password: String,
    phone_number: String,
    terms_accepted: bool,
) -> Result<RegisterOutcome> {
    if user_repo::find_by_email(db, &email).await?.is_some() {
        tracing::info!("Registration rejected, email already in use: {}", email);
        return Ok(RegisterOutcome::DuplicateEmail);
    }

    let password_hash = hash_password(&password)?;
    let user = user_repo::insert(db, name, email, password_hash, phone_number, terms_accepted).await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(RegisterOutcome::Created(user))
}

/// Authenticates a user by email and password.
pub async fn authenticate(db: &Pool, email: &str, password: &str) -> Result<LoginOutcome> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let Some(user) = user_repo::find_by_email(db, email).await? else {
        return Ok(LoginOutcome::UserNotFound);
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(LoginOutcome::WrongPassword);
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(LoginOutcome::Success(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = hash_password("password1").unwrap();
        assert_ne!(hash, "password1");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn verify_accepts_the_original_password_only() {
        let hash = hash_password("password1").unwrap();
        assert!(verify_password("password1", &hash).unwrap());
        assert!(!verify_password("password2", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn salts_make_hashes_distinct() {
        let a = hash_password("password1").unwrap();
        let b = hash_password("password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(verify_password("password1", "not-a-phc-string").is_err());
    }
}

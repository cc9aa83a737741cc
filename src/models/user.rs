use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a registered account.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's full name.
    pub name: String,
    /// The user's email address, used as the lookup key.
    pub email: String,
    /// The user's hashed password. Never the plaintext.
    pub password_hash: String,
    /// The user's mobile phone number.
    pub phone_number: String,
    /// Whether the user accepted the terms and conditions.
    pub terms_accepted: bool,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::User,
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row
            .try_get("id")
            .map_err(|_| AppError::MissingData("id".to_string()))?,
        name: row
            .try_get("name")
            .map_err(|_| AppError::MissingData("name".to_string()))?,
        email: row
            .try_get("email")
            .map_err(|_| AppError::MissingData("email".to_string()))?,
        password_hash: row
            .try_get("password")
            .map_err(|_| AppError::MissingData("password".to_string()))?,
        phone_number: row
            .try_get("phone_number")
            .map_err(|_| AppError::MissingData("phone_number".to_string()))?,
        terms_accepted: row
            .try_get("terms_accepted")
            .map_err(|_| AppError::MissingData("terms_accepted".to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Inserts a new user record.
pub async fn insert(
    pool: &Pool,
    name: String,
    email: String,
    password_hash: String,
    phone_number: String,
    terms_accepted: bool,
) -> Result<User> {
    let client = pool.get().await?;
    let id = Uuid::new_v4();
    let row = client
        .query_one(
            r#"
            INSERT INTO users (id, name, email, password, phone_number, terms_accepted)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
            &[&id, &name, &email, &password_hash, &phone_number, &terms_accepted],
        )
        .await?;
    row_to_user(&row)
}

/// Finds a user by their email address.
///
/// Email is not unique at the storage level; when duplicates exist the
/// oldest record wins, matching first-inserted lookup order.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT *
            FROM users
            WHERE email = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
            &[&email],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

//! User persistence: registration, lookups and profile updates.

use uuid::Uuid;

use crate::{db::DbPool, error::AppError, models::user::User};

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, profile_image, created_at, updated_at";

/// Fields needed to register a user. The password is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Insert a user and their zero-balance wallet in one database transaction.
///
/// A concurrent registration with the same email fails on `users_email_key`
/// and surfaces as `AppError::Database`, which translates to the same
/// duplicate-email response.
pub async fn create_user_with_wallet(pool: &DbPool, new_user: NewUser<'_>) -> Result<User, AppError> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, first_name, last_name)
        VALUES ($1, $2, $3, $4)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.first_name)
    .bind(new_user.last_name)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO wallets (user_id, balance) VALUES ($1, 0)")
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user)
}

pub async fn email_exists(pool: &DbPool, email: &str) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &DbPool, user_id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Update the names that are present; absent ones keep their stored value.
pub async fn update_profile(
    pool: &DbPool,
    user_id: Uuid,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_profile_image(
    pool: &DbPool,
    user_id: Uuid,
    profile_image: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET profile_image = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(profile_image)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

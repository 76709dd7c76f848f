//! Database helpers for the user store.
//!
//! The store contract is small: look up a user by email or id, insert a new
//! user. Emails are normalized before they get here; the unique constraint
//! on `email` is the authoritative guard against duplicate registrations.

use anyhow::{Context, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

/// A full user row. The hash never leaves this module's callers; response
/// types convert to `PublicUser` which drops it.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) created_at: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    Created(UserRecord),
    EmailTaken,
}

fn user_from_row(row: &PgRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

pub(crate) async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = "SELECT id, name, email, password_hash, created_at::text AS created_at \
                 FROM users WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up user by email")?;

    Ok(row.map(|row| user_from_row(&row)))
}

pub(crate) async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
    let query = "SELECT id, name, email, password_hash, created_at::text AS created_at \
                 FROM users WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up user by id")?;

    Ok(row.map(|row| user_from_row(&row)))
}

pub(crate) async fn insert_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
                 RETURNING id, name, email, password_hash, created_at::text AS created_at";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    match sqlx::query(query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await
    {
        Ok(row) => Ok(InsertOutcome::Created(user_from_row(&row))),
        // A racing duplicate insert loses at the constraint, not as a fault
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::EmailTaken),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

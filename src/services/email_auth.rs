//! Email access-code auth service.
//!
//! Creates and verifies short-lived six-character codes linked to an email.
//! A request may name the account's role. It is applied on the first
//! successful verification for an account without one, together with the
//! matching empty profile; later requests cannot change it.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgConnection, PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::gate::Role;
use crate::services::profile;

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;
const EMAIL_AUTH_TEMPLATE: &str = include_str!("../../templates/email_auth.html");

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("unknown role: {0}")]
    InvalidRole(String),
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

/// Sign-up / sign-in request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AccessCodeRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Role tag to assign when the account has none yet.
    #[serde(default)]
    pub role: Option<String>,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN || !normalized.bytes().all(|c| CODE_ALPHABET.contains(&c)) {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[must_use]
pub fn hash_access_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    let bytes = hasher.finalize();
    crate::services::session::bytes_to_hex(&bytes)
}

fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}

/// Display name for a new account: the supplied name, else the email's local part.
#[must_use]
pub fn display_name(full_name: Option<&str>, email: &str) -> String {
    full_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| name_from_email(email), str::to_owned)
}

/// Parse an optional sign-up role; only the three known roles are accepted.
///
/// # Errors
///
/// Returns `InvalidRole` for a non-empty tag that is not a known role.
pub fn parse_signup_role(raw: Option<&str>) -> Result<Option<Role>, EmailAuthError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(tag) => Role::known(tag)
            .map(Some)
            .ok_or_else(|| EmailAuthError::InvalidRole(tag.to_owned())),
    }
}

/// A freshly issued code and the normalized address it was issued for.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub email: String,
    pub code: String,
}

/// Issue a fresh code for the address, replacing any unconsumed one.
///
/// Nothing about the account is written here. The display name and the
/// requested role ride on the code row and only take effect once the code
/// is verified, so an unverified request cannot claim someone's address.
pub async fn request_access_code(pool: &PgPool, req: &AccessCodeRequest) -> Result<IssuedCode, EmailAuthError> {
    let email = normalize_email(&req.email).ok_or(EmailAuthError::InvalidEmail)?;
    let role = parse_signup_role(req.role.as_deref())?;
    let name = display_name(req.full_name.as_deref(), &email);

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM email_login_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(&email)
        .execute(&mut *tx)
        .await?;

    let code = generate_access_code();
    sqlx::query(
        r"INSERT INTO email_login_codes (email, code_hash, full_name, requested_role)
          VALUES ($1, $2, $3, $4::app_role)",
    )
    .bind(&email)
    .bind(hash_access_code(&code))
    .bind(&name)
    .bind(role.as_ref().map(Role::as_str))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(IssuedCode { email, code })
}

/// Record `role` for a user that has none yet and create the matching empty
/// profile. Returns whether the role was assigned.
async fn assign_initial_role(
    conn: &mut PgConnection,
    user_id: Uuid,
    role: &Role,
    name: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query(
        r"INSERT INTO user_roles (user_id, role)
          VALUES ($1, $2::app_role)
          ON CONFLICT (user_id) DO NOTHING
          RETURNING id",
    )
    .bind(user_id)
    .bind(role.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    if inserted.is_none() {
        return Ok(false);
    }
    profile::create_empty_profile(conn, role, user_id, name, email).await?;
    info!(%user_id, role = %role, "account role assigned");
    Ok(true)
}

/// Consume the newest live code for `email`. On a match, upsert the user
/// and apply the role requested with the code. Returns the user's ID.
pub async fn verify_access_code(pool: &PgPool, email: &str, code: &str) -> Result<Uuid, EmailAuthError> {
    let normalized_email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let normalized_code = normalize_code(code).ok_or(EmailAuthError::InvalidCode)?;
    let code_hash = hash_access_code(&normalized_code);

    let mut tx = pool.begin().await?;

    let consumed = sqlx::query(
        r"UPDATE email_login_codes
          SET consumed_at = now()
          WHERE id = (
              SELECT id
              FROM email_login_codes
              WHERE email = $1
                AND consumed_at IS NULL
                AND expires_at > now()
              ORDER BY created_at DESC
              LIMIT 1
          )
          AND code_hash = $2
          RETURNING full_name, requested_role::text AS requested_role",
    )
    .bind(&normalized_email)
    .bind(&code_hash)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(consumed) = consumed else {
        sqlx::query(
            r"UPDATE email_login_codes
              SET attempts = attempts + 1,
                  consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE consumed_at END
              WHERE id = (
                  SELECT id
                  FROM email_login_codes
                  WHERE email = $1
                    AND consumed_at IS NULL
                    AND expires_at > now()
                  ORDER BY created_at DESC
                  LIMIT 1
              )",
        )
        .bind(&normalized_email)
        .bind(MAX_FAILED_ATTEMPTS)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        return Err(EmailAuthError::VerificationFailed);
    };

    let name: String = consumed.get("full_name");
    let requested_role = consumed.get::<Option<String>, _>("requested_role").map(Role::from);

    let user_id: Uuid = sqlx::query(
        r"INSERT INTO users (email, full_name)
          VALUES ($1, $2)
          ON CONFLICT (email) DO UPDATE SET full_name = users.full_name
          RETURNING id",
    )
    .bind(&normalized_email)
    .bind(&name)
    .fetch_one(&mut *tx)
    .await?
    .get("id");

    if let Some(role) = requested_role {
        assign_initial_role(&mut tx, user_id, &role, &name, &normalized_email).await?;
    }

    tx.commit().await?;
    Ok(user_id)
}

pub async fn send_access_code_email(
    resend_api_key: &str,
    resend_from: &str,
    to_email: &str,
    code: &str,
) -> Result<(), EmailAuthError> {
    let resend = Resend::new(resend_api_key);
    let to = [to_email];
    let subject = "Your Placement Connect access code";
    let html = render_email_auth_template(to_email, code);

    let email = CreateEmailBaseOptions::new(resend_from, to, subject).with_html(&html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| EmailAuthError::EmailDelivery(e.to_string()))?;
    Ok(())
}

#[must_use]
pub fn render_email_auth_template(email: &str, code: &str) -> String {
    EMAIL_AUTH_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;

//! Profile service for the three user roles.
//!
//! DESIGN
//! ======
//! Each account owns at most one profile, in the table matching its role.
//! Profiles are created empty when the role is assigned at sign-up and are
//! looked up by `user_id` from the session. Verification flags are only
//! written by placement heads; route guards enforce that.

use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::gate::Role;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub year_of_graduation: Option<i32>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub projects: Option<serde_json::Value>,
    pub internships: Option<serde_json::Value>,
    pub resume_url: Option<String>,
    pub is_verified: bool,
    pub is_placed: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct CompanyProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_verified: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PlacementHeadProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: Option<String>,
}

const STUDENT_COLUMNS: &str = "id, user_id, full_name, email, phone, branch, cgpa, year_of_graduation, \
     skills, certifications, projects, internships, resume_url, is_verified, is_placed, \
     to_char(created_at, 'YYYY-MM-DD') AS created_at";

const COMPANY_COLUMNS: &str = "id, user_id, company_name, email, phone, website, industry, description, \
     logo_url, is_verified, to_char(created_at, 'YYYY-MM-DD') AS created_at";

// =============================================================================
// CREATION
// =============================================================================

/// Insert the empty profile matching `role`. Unrecognized roles get none.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_empty_profile(
    conn: &mut PgConnection,
    role: &Role,
    user_id: Uuid,
    name: &str,
    email: &str,
) -> Result<(), sqlx::Error> {
    let sql = match role {
        Role::Student => "INSERT INTO student_profiles (user_id, full_name, email) VALUES ($1, $2, $3)",
        Role::Company => "INSERT INTO company_profiles (user_id, company_name, email) VALUES ($1, $2, $3)",
        Role::PlacementHead => "INSERT INTO placement_head_profiles (user_id, full_name, email) VALUES ($1, $2, $3)",
        Role::Unrecognized(_) => return Ok(()),
    };
    sqlx::query(sql)
        .bind(user_id)
        .bind(name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(())
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Fetch the student profile owned by `user_id`.
///
/// # Errors
///
/// Returns `NotFound` if the user has no student profile.
pub async fn student_for_user(pool: &PgPool, user_id: Uuid) -> Result<StudentProfile, ProfileError> {
    sqlx::query_as::<_, StudentProfile>(&format!("SELECT {STUDENT_COLUMNS} FROM student_profiles WHERE user_id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProfileError::NotFound(user_id))
}

/// Fetch the company profile owned by `user_id`.
///
/// # Errors
///
/// Returns `NotFound` if the user has no company profile.
pub async fn company_for_user(pool: &PgPool, user_id: Uuid) -> Result<CompanyProfile, ProfileError> {
    sqlx::query_as::<_, CompanyProfile>(&format!("SELECT {COMPANY_COLUMNS} FROM company_profiles WHERE user_id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProfileError::NotFound(user_id))
}

/// Fetch the placement-head profile owned by `user_id`.
///
/// # Errors
///
/// Returns `NotFound` if the user has no placement-head profile.
pub async fn placement_head_for_user(pool: &PgPool, user_id: Uuid) -> Result<PlacementHeadProfile, ProfileError> {
    sqlx::query_as::<_, PlacementHeadProfile>(
        r"SELECT id, user_id, full_name, email, department,
                 to_char(created_at, 'YYYY-MM-DD') AS created_at
          FROM placement_head_profiles
          WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProfileError::NotFound(user_id))
}

/// All student profiles, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_students(pool: &PgPool) -> Result<Vec<StudentProfile>, ProfileError> {
    let rows = sqlx::query_as::<_, StudentProfile>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM student_profiles ORDER BY student_profiles.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// All company profiles, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_companies(pool: &PgPool) -> Result<Vec<CompanyProfile>, ProfileError> {
    let rows = sqlx::query_as::<_, CompanyProfile>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM company_profiles ORDER BY company_profiles.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// =============================================================================
// SKILLS
// =============================================================================

/// Skills after adding `raw`. `None` when the trimmed skill is empty or
/// already present, meaning nothing should be written.
#[must_use]
pub fn with_skill_added(skills: &[String], raw: &str) -> Option<Vec<String>> {
    let skill = raw.trim();
    if skill.is_empty() || skills.iter().any(|s| s == skill) {
        return None;
    }
    let mut next = skills.to_vec();
    next.push(skill.to_owned());
    Some(next)
}

/// Skills after removing every entry equal to `skill`. `None` when absent.
#[must_use]
pub fn with_skill_removed(skills: &[String], skill: &str) -> Option<Vec<String>> {
    if !skills.iter().any(|s| s == skill) {
        return None;
    }
    Some(skills.iter().filter(|s| *s != skill).cloned().collect())
}

async fn write_skills(pool: &PgPool, profile_id: Uuid, skills: &[String]) -> Result<(), ProfileError> {
    sqlx::query("UPDATE student_profiles SET skills = $2, updated_at = now() WHERE id = $1")
        .bind(profile_id)
        .bind(skills)
        .execute(pool)
        .await?;
    Ok(())
}

/// Add a skill to the caller's student profile. Returns the resulting skills.
///
/// # Errors
///
/// Returns `NotFound` if the user has no student profile.
pub async fn add_skill(pool: &PgPool, user_id: Uuid, raw: &str) -> Result<Vec<String>, ProfileError> {
    let profile = student_for_user(pool, user_id).await?;
    match with_skill_added(&profile.skills, raw) {
        Some(next) => {
            write_skills(pool, profile.id, &next).await?;
            Ok(next)
        }
        None => Ok(profile.skills),
    }
}

/// Remove a skill from the caller's student profile. Returns the resulting skills.
///
/// # Errors
///
/// Returns `NotFound` if the user has no student profile.
pub async fn remove_skill(pool: &PgPool, user_id: Uuid, skill: &str) -> Result<Vec<String>, ProfileError> {
    let profile = student_for_user(pool, user_id).await?;
    match with_skill_removed(&profile.skills, skill) {
        Some(next) => {
            write_skills(pool, profile.id, &next).await?;
            Ok(next)
        }
        None => Ok(profile.skills),
    }
}

// =============================================================================
// VERIFICATION
// =============================================================================

async fn set_flag(pool: &PgPool, sql: &str, id: Uuid, value: bool) -> Result<(), ProfileError> {
    let result = sqlx::query(sql)
        .bind(id)
        .bind(value)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ProfileError::NotFound(id));
    }
    Ok(())
}

/// Set `is_verified` on a student profile.
///
/// # Errors
///
/// Returns `NotFound` if no student profile has this ID.
pub async fn set_student_verified(pool: &PgPool, profile_id: Uuid, verified: bool) -> Result<(), ProfileError> {
    set_flag(
        pool,
        "UPDATE student_profiles SET is_verified = $2, updated_at = now() WHERE id = $1",
        profile_id,
        verified,
    )
    .await?;
    info!(%profile_id, verified, "student verification updated");
    Ok(())
}

/// Set `is_placed` on a student profile.
///
/// # Errors
///
/// Returns `NotFound` if no student profile has this ID.
pub async fn set_student_placed(pool: &PgPool, profile_id: Uuid, placed: bool) -> Result<(), ProfileError> {
    set_flag(
        pool,
        "UPDATE student_profiles SET is_placed = $2, updated_at = now() WHERE id = $1",
        profile_id,
        placed,
    )
    .await?;
    info!(%profile_id, placed, "student placement updated");
    Ok(())
}

/// Set `is_verified` on a company profile.
///
/// # Errors
///
/// Returns `NotFound` if no company profile has this ID.
pub async fn set_company_verified(pool: &PgPool, profile_id: Uuid, verified: bool) -> Result<(), ProfileError> {
    set_flag(
        pool,
        "UPDATE company_profiles SET is_verified = $2, updated_at = now() WHERE id = $1",
        profile_id,
        verified,
    )
    .await?;
    info!(%profile_id, verified, "company verification updated");
    Ok(())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

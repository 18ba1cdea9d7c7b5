//! Application service: students apply, recruiters move status along.
//!
//! DESIGN
//! ======
//! A student applies at most once per posting (unique constraint). Status
//! updates are scoped by actor: a company may only touch applications to
//! its own postings, while placement heads may update any application.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("unknown application status: {0}")]
    InvalidStatus(String),
    #[error("application not found: {0}")]
    NotFound(Uuid),
    #[error("job not found: {0}")]
    JobNotFound(Uuid),
    #[error("job is closed: {0}")]
    JobClosed(Uuid),
    #[error("already applied to job: {0}")]
    AlreadyApplied(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    InterviewScheduled,
    Selected,
    Rejected,
}

impl std::str::FromStr for ApplicationStatus {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "shortlisted" => Ok(Self::Shortlisted),
            "interview_scheduled" => Ok(Self::InterviewScheduled),
            "selected" => Ok(Self::Selected),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ApplicationError::InvalidStatus(s.to_owned())),
        }
    }
}

impl ApplicationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shortlisted => "shortlisted",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
        }
    }
}

/// Who is changing an application's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusActor {
    /// Company profile ID; limited to its own postings.
    Company(Uuid),
    PlacementHead,
}

/// A student's own application with job and company context.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StudentApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub interview_date: Option<String>,
    pub created_at: Option<String>,
    pub job_title: String,
    pub salary_package: Option<String>,
    pub company_name: String,
    pub company_logo_url: Option<String>,
}

/// An application to one of a company's postings, with the applicant summary.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CompanyApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub student_branch: Option<String>,
    pub student_cgpa: Option<f64>,
    pub student_skills: Vec<String>,
}

/// Placement-office view of any application.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApplicationOverview {
    pub id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: Option<String>,
    pub student_name: String,
    pub student_email: String,
    pub student_branch: Option<String>,
    pub job_title: String,
    pub company_name: String,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Apply `student_id` to an active posting. Returns the new application ID.
///
/// # Errors
///
/// `JobNotFound`/`JobClosed` when the posting is missing or inactive,
/// `AlreadyApplied` on a repeat application.
pub async fn apply(pool: &PgPool, student_id: Uuid, job_id: Uuid) -> Result<Uuid, ApplicationError> {
    let active: Option<bool> = sqlx::query_scalar("SELECT is_active FROM job_postings WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    match active {
        None => return Err(ApplicationError::JobNotFound(job_id)),
        Some(false) => return Err(ApplicationError::JobClosed(job_id)),
        Some(true) => {}
    }

    let id: Option<Uuid> = sqlx::query_scalar(
        r"INSERT INTO applications (student_id, job_id)
          VALUES ($1, $2)
          ON CONFLICT (student_id, job_id) DO NOTHING
          RETURNING id",
    )
    .bind(student_id)
    .bind(job_id)
    .fetch_optional(pool)
    .await?;

    let id = id.ok_or(ApplicationError::AlreadyApplied(job_id))?;
    info!(application_id = %id, %student_id, %job_id, "application submitted");
    Ok(id)
}

/// Applications submitted by a student, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_for_student(pool: &PgPool, student_id: Uuid) -> Result<Vec<StudentApplication>, ApplicationError> {
    let rows = sqlx::query_as::<_, StudentApplication>(
        r"SELECT a.id, a.job_id, a.status, a.notes,
                 to_char(a.interview_date, 'YYYY-MM-DD HH24:MI') AS interview_date,
                 to_char(a.created_at, 'YYYY-MM-DD') AS created_at,
                 j.title AS job_title, j.salary_package,
                 c.company_name, c.logo_url AS company_logo_url
          FROM applications a
          JOIN job_postings j ON j.id = a.job_id
          JOIN company_profiles c ON c.id = j.company_id
          WHERE a.student_id = $1
          ORDER BY a.created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Applications to postings owned by `company_id`, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_for_company(pool: &PgPool, company_id: Uuid) -> Result<Vec<CompanyApplication>, ApplicationError> {
    let rows = sqlx::query_as::<_, CompanyApplication>(
        r"SELECT a.id, a.job_id, j.title AS job_title, a.status, a.notes,
                 to_char(a.created_at, 'YYYY-MM-DD') AS created_at,
                 s.id AS student_id, s.full_name AS student_name, s.email AS student_email,
                 s.branch AS student_branch, s.cgpa AS student_cgpa, s.skills AS student_skills
          FROM applications a
          JOIN job_postings j ON j.id = a.job_id
          JOIN student_profiles s ON s.id = a.student_id
          WHERE j.company_id = $1
          ORDER BY a.created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every application, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_all(pool: &PgPool) -> Result<Vec<ApplicationOverview>, ApplicationError> {
    let rows = sqlx::query_as::<_, ApplicationOverview>(
        r"SELECT a.id, a.status,
                 to_char(a.created_at, 'YYYY-MM-DD') AS created_at,
                 s.full_name AS student_name, s.email AS student_email, s.branch AS student_branch,
                 j.title AS job_title, c.company_name
          FROM applications a
          JOIN student_profiles s ON s.id = a.student_id
          JOIN job_postings j ON j.id = a.job_id
          JOIN company_profiles c ON c.id = j.company_id
          ORDER BY a.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Change an application's status on behalf of `actor`.
///
/// # Errors
///
/// Returns `NotFound` if the application does not exist or is outside the
/// actor's scope.
pub async fn update_status(
    pool: &PgPool,
    actor: StatusActor,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<(), ApplicationError> {
    let result = match actor {
        StatusActor::Company(company_id) => {
            sqlx::query(
                r"UPDATE applications a
                  SET status = $2, updated_at = now()
                  FROM job_postings j
                  WHERE a.id = $1 AND a.job_id = j.id AND j.company_id = $3",
            )
            .bind(application_id)
            .bind(status)
            .bind(company_id)
            .execute(pool)
            .await?
        }
        StatusActor::PlacementHead => {
            sqlx::query("UPDATE applications SET status = $2, updated_at = now() WHERE id = $1")
                .bind(application_id)
                .bind(status)
                .execute(pool)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(ApplicationError::NotFound(application_id));
    }
    info!(%application_id, status = status.as_str(), "application status updated");
    Ok(())
}

#[cfg(test)]
#[path = "application_test.rs"]
mod tests;

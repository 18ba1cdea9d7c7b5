//! Job posting service.
//!
//! Companies post openings from a flat form of strings; parsing is lenient
//! and fills defaults the same way the posting dialog always has. Students
//! see active postings only.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job title is required")]
    MissingTitle,
    #[error("job not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Raw posting form. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub required_skills: String,
    pub min_cgpa: String,
    /// Comma-separated.
    pub eligible_branches: String,
    pub graduation_year: String,
    pub salary_package: String,
    pub openings: String,
}

/// Validated posting ready for insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub title: String,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub min_cgpa: f64,
    pub eligible_branches: Vec<String>,
    pub graduation_year: Option<i32>,
    pub salary_package: Option<String>,
    pub openings: i32,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub min_cgpa: f64,
    pub eligible_branches: Vec<String>,
    pub graduation_year: Option<i32>,
    pub salary_package: Option<String>,
    pub openings: i32,
    pub is_active: bool,
    pub created_at: Option<String>,
}

/// Posting joined with the company fields shown on listings.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct JobListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub job: JobPosting,
    pub company_name: String,
    pub company_logo_url: Option<String>,
    pub company_industry: Option<String>,
}

const JOB_COLUMNS: &str = "j.id, j.company_id, j.title, j.description, j.required_skills, j.min_cgpa, \
     j.eligible_branches, j.graduation_year, j.salary_package, j.openings, j.is_active, \
     to_char(j.created_at, 'YYYY-MM-DD') AS created_at";

// =============================================================================
// FORM PARSING
// =============================================================================

/// Split a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    Some(raw.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

impl JobForm {
    /// Validate and fill defaults: `min_cgpa` 0, `openings` 1, no graduation year.
    ///
    /// # Errors
    ///
    /// Returns `MissingTitle` when the title is blank.
    pub fn parse(&self) -> Result<NewJobPosting, JobError> {
        let title = non_empty(&self.title).ok_or(JobError::MissingTitle)?;
        let min_cgpa = self
            .min_cgpa
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let graduation_year = self.graduation_year.trim().parse::<i32>().ok();
        let openings = self
            .openings
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(1);

        Ok(NewJobPosting {
            title,
            description: non_empty(&self.description),
            required_skills: split_list(&self.required_skills),
            min_cgpa,
            eligible_branches: split_list(&self.eligible_branches),
            graduation_year,
            salary_package: non_empty(&self.salary_package),
            openings,
        })
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// Insert a posting for `company_id`.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_job(pool: &PgPool, company_id: Uuid, job: &NewJobPosting) -> Result<JobPosting, JobError> {
    let row = sqlx::query_as::<_, JobPosting>(&format!(
        r"WITH j AS (
              INSERT INTO job_postings
                  (company_id, title, description, required_skills, min_cgpa,
                   eligible_branches, graduation_year, salary_package, openings)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
              RETURNING *
          )
          SELECT {JOB_COLUMNS} FROM j"
    ))
    .bind(company_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.required_skills)
    .bind(job.min_cgpa)
    .bind(&job.eligible_branches)
    .bind(job.graduation_year)
    .bind(&job.salary_package)
    .bind(job.openings)
    .fetch_one(pool)
    .await?;

    info!(job_id = %row.id, %company_id, title = %row.title, "job posted");
    Ok(row)
}

/// Postings owned by `company_id`, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_company_jobs(pool: &PgPool, company_id: Uuid) -> Result<Vec<JobPosting>, JobError> {
    let rows = sqlx::query_as::<_, JobPosting>(&format!(
        "SELECT {JOB_COLUMNS} FROM job_postings j WHERE j.company_id = $1 ORDER BY j.created_at DESC"
    ))
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Open or close a posting. Only the owning company may do so.
///
/// # Errors
///
/// Returns `NotFound` if the posting does not exist or belongs to another company.
pub async fn set_job_active(pool: &PgPool, company_id: Uuid, job_id: Uuid, active: bool) -> Result<(), JobError> {
    let result =
        sqlx::query("UPDATE job_postings SET is_active = $3, updated_at = now() WHERE id = $1 AND company_id = $2")
            .bind(job_id)
            .bind(company_id)
            .bind(active)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(JobError::NotFound(job_id));
    }
    Ok(())
}

async fn list_listings(pool: &PgPool, active_only: bool) -> Result<Vec<JobListing>, JobError> {
    let rows = sqlx::query_as::<_, JobListing>(&format!(
        r"SELECT {JOB_COLUMNS},
                 c.company_name,
                 c.logo_url AS company_logo_url,
                 c.industry AS company_industry
          FROM job_postings j
          JOIN company_profiles c ON c.id = j.company_id
          WHERE ($1 = false OR j.is_active)
          ORDER BY j.created_at DESC"
    ))
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Active postings with company details, for students.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobListing>, JobError> {
    list_listings(pool, true).await
}

/// Every posting with company details, for placement heads.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_all_jobs(pool: &PgPool) -> Result<Vec<JobListing>, JobError> {
    list_listings(pool, false).await
}

#[cfg(test)]
#[path = "job_test.rs"]
mod tests;

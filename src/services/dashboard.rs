//! Per-role dashboard documents and their summary statistics.
//!
//! Statistics are computed from the fetched rows rather than with separate
//! aggregate queries so the numbers always agree with the lists returned
//! alongside them.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::announcement::{self, Announcement, AnnouncementError};
use super::application::{
    self, ApplicationError, ApplicationOverview, ApplicationStatus, CompanyApplication, StudentApplication,
};
use super::job::{self, JobError, JobListing, JobPosting};
use super::profile::{self, CompanyProfile, PlacementHeadProfile, ProfileError, StudentProfile};
use crate::gate::Role;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Job(#[from] JobError),
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Announcement(#[from] AnnouncementError),
}

// =============================================================================
// STATS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudentStats {
    pub available_jobs: usize,
    pub applications: usize,
    pub shortlisted: usize,
    pub interviews_scheduled: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    pub active_jobs: usize,
    pub total_applications: usize,
    pub shortlisted: usize,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    pub students: usize,
    pub verified_students: usize,
    pub placed_students: usize,
    /// Whole percent of students placed, rounded half up. 0 with no students.
    pub placement_rate: usize,
    pub companies: usize,
    pub verified_companies: usize,
    pub active_jobs: usize,
    pub total_jobs: usize,
}

fn count_status<'a>(statuses: impl Iterator<Item = &'a ApplicationStatus>, wanted: ApplicationStatus) -> usize {
    statuses.filter(|s| **s == wanted).count()
}

#[must_use]
pub fn student_stats(available_jobs: &[JobListing], applications: &[StudentApplication]) -> StudentStats {
    StudentStats {
        available_jobs: available_jobs.len(),
        applications: applications.len(),
        shortlisted: count_status(applications.iter().map(|a| &a.status), ApplicationStatus::Shortlisted),
        interviews_scheduled: count_status(
            applications.iter().map(|a| &a.status),
            ApplicationStatus::InterviewScheduled,
        ),
    }
}

#[must_use]
pub fn company_stats(jobs: &[JobPosting], applications: &[CompanyApplication]) -> CompanyStats {
    CompanyStats {
        active_jobs: jobs.iter().filter(|j| j.is_active).count(),
        total_applications: applications.len(),
        shortlisted: count_status(applications.iter().map(|a| &a.status), ApplicationStatus::Shortlisted),
        selected: count_status(applications.iter().map(|a| &a.status), ApplicationStatus::Selected),
    }
}

/// Rounded percentage `part / whole`, 0 when `whole` is 0.
#[must_use]
pub fn percent(part: usize, whole: usize) -> usize {
    if whole == 0 {
        return 0;
    }
    (part * 200 + whole) / (whole * 2)
}

#[must_use]
pub fn placement_stats(students: &[StudentProfile], companies: &[CompanyProfile], jobs: &[JobListing]) -> PlacementStats {
    let placed_students = students.iter().filter(|s| s.is_placed).count();
    PlacementStats {
        students: students.len(),
        verified_students: students.iter().filter(|s| s.is_verified).count(),
        placed_students,
        placement_rate: percent(placed_students, students.len()),
        companies: companies.len(),
        verified_companies: companies.iter().filter(|c| c.is_verified).count(),
        active_jobs: jobs.iter().filter(|j| j.job.is_active).count(),
        total_jobs: jobs.len(),
    }
}

// =============================================================================
// DOCUMENTS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub profile: StudentProfile,
    pub stats: StudentStats,
    pub applications: Vec<StudentApplication>,
    pub available_jobs: Vec<JobListing>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct CompanyDashboard {
    pub profile: CompanyProfile,
    pub stats: CompanyStats,
    pub jobs: Vec<JobPosting>,
    pub applications: Vec<CompanyApplication>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct PlacementHeadDashboard {
    pub profile: PlacementHeadProfile,
    pub stats: PlacementStats,
    /// Students awaiting verification.
    pub pending_students: Vec<StudentProfile>,
    /// Companies awaiting verification.
    pub pending_companies: Vec<CompanyProfile>,
    pub jobs: Vec<JobListing>,
    pub applications: Vec<ApplicationOverview>,
    pub announcements: Vec<Announcement>,
}

/// Assemble the student dashboard for `user_id`.
///
/// # Errors
///
/// Returns a profile error if the user has no student profile, or any
/// underlying database error.
pub async fn load_student(pool: &PgPool, user_id: Uuid) -> Result<StudentDashboard, DashboardError> {
    let profile = profile::student_for_user(pool, user_id).await?;
    let applications = application::list_for_student(pool, profile.id).await?;
    let available_jobs = job::list_active_jobs(pool).await?;
    let announcements = announcement::list_visible(pool, Some(&Role::Student)).await?;

    Ok(StudentDashboard {
        stats: student_stats(&available_jobs, &applications),
        profile,
        applications,
        available_jobs,
        announcements,
    })
}

/// Assemble the company dashboard for `user_id`.
///
/// # Errors
///
/// Returns a profile error if the user has no company profile, or any
/// underlying database error.
pub async fn load_company(pool: &PgPool, user_id: Uuid) -> Result<CompanyDashboard, DashboardError> {
    let profile = profile::company_for_user(pool, user_id).await?;
    let jobs = job::list_company_jobs(pool, profile.id).await?;
    let applications = application::list_for_company(pool, profile.id).await?;
    let announcements = announcement::list_visible(pool, Some(&Role::Company)).await?;

    Ok(CompanyDashboard { stats: company_stats(&jobs, &applications), profile, jobs, applications, announcements })
}

/// Assemble the placement-office dashboard for `user_id`.
///
/// # Errors
///
/// Returns a profile error if the user has no placement-head profile, or any
/// underlying database error.
pub async fn load_placement_head(pool: &PgPool, user_id: Uuid) -> Result<PlacementHeadDashboard, DashboardError> {
    let profile = profile::placement_head_for_user(pool, user_id).await?;
    let students = profile::list_students(pool).await?;
    let companies = profile::list_companies(pool).await?;
    let jobs = job::list_all_jobs(pool).await?;
    let applications = application::list_all(pool).await?;
    let announcements = announcement::list_visible(pool, Some(&Role::PlacementHead)).await?;

    let stats = placement_stats(&students, &companies, &jobs);
    Ok(PlacementHeadDashboard {
        profile,
        stats,
        pending_students: students.into_iter().filter(|s| !s.is_verified).collect(),
        pending_companies: companies.into_iter().filter(|c| !c.is_verified).collect(),
        jobs,
        applications,
        announcements,
    })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

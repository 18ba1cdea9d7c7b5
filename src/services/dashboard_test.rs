use super::*;

fn student(verified: bool, placed: bool) -> StudentProfile {
    StudentProfile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: "S".into(),
        email: "s@example.edu".into(),
        phone: None,
        branch: None,
        cgpa: None,
        year_of_graduation: None,
        skills: Vec::new(),
        certifications: Vec::new(),
        projects: None,
        internships: None,
        resume_url: None,
        is_verified: verified,
        is_placed: placed,
        created_at: None,
    }
}

fn company(verified: bool) -> CompanyProfile {
    CompanyProfile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        company_name: "Acme".into(),
        email: "hr@acme.test".into(),
        phone: None,
        website: None,
        industry: None,
        description: None,
        logo_url: None,
        is_verified: verified,
        created_at: None,
    }
}

fn posting(active: bool) -> JobPosting {
    JobPosting {
        id: Uuid::new_v4(),
        company_id: Uuid::nil(),
        title: "Engineer".into(),
        description: None,
        required_skills: Vec::new(),
        min_cgpa: 0.0,
        eligible_branches: Vec::new(),
        graduation_year: None,
        salary_package: None,
        openings: 1,
        is_active: active,
        created_at: None,
    }
}

fn listing(active: bool) -> JobListing {
    JobListing { job: posting(active), company_name: "Acme".into(), company_logo_url: None, company_industry: None }
}

fn student_app(status: ApplicationStatus) -> StudentApplication {
    StudentApplication {
        id: Uuid::new_v4(),
        job_id: Uuid::nil(),
        status,
        notes: None,
        interview_date: None,
        created_at: None,
        job_title: "Engineer".into(),
        salary_package: None,
        company_name: "Acme".into(),
        company_logo_url: None,
    }
}

fn company_app(status: ApplicationStatus) -> CompanyApplication {
    CompanyApplication {
        id: Uuid::new_v4(),
        job_id: Uuid::nil(),
        job_title: "Engineer".into(),
        status,
        notes: None,
        created_at: None,
        student_id: Uuid::nil(),
        student_name: "S".into(),
        student_email: "s@example.edu".into(),
        student_branch: None,
        student_cgpa: None,
        student_skills: Vec::new(),
    }
}

// =============================================================================
// percent
// =============================================================================

#[test]
fn percent_of_zero_whole_is_zero() {
    assert_eq!(percent(0, 0), 0);
}

#[test]
fn percent_rounds_half_up() {
    assert_eq!(percent(1, 2), 50);
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 8), 13);
    assert_eq!(percent(5, 5), 100);
}

// =============================================================================
// student_stats
// =============================================================================

#[test]
fn student_stats_counts_by_status() {
    let jobs = vec![listing(true), listing(true), listing(true)];
    let apps = vec![
        student_app(ApplicationStatus::Pending),
        student_app(ApplicationStatus::Shortlisted),
        student_app(ApplicationStatus::Shortlisted),
        student_app(ApplicationStatus::InterviewScheduled),
    ];
    let stats = student_stats(&jobs, &apps);
    assert_eq!(
        stats,
        StudentStats { available_jobs: 3, applications: 4, shortlisted: 2, interviews_scheduled: 1 }
    );
}

#[test]
fn student_stats_empty() {
    assert_eq!(student_stats(&[], &[]), StudentStats::default());
}

// =============================================================================
// company_stats
// =============================================================================

#[test]
fn company_stats_counts_active_jobs_and_outcomes() {
    let jobs = vec![posting(true), posting(false), posting(true)];
    let apps = vec![
        company_app(ApplicationStatus::Selected),
        company_app(ApplicationStatus::Shortlisted),
        company_app(ApplicationStatus::Rejected),
    ];
    let stats = company_stats(&jobs, &apps);
    assert_eq!(stats, CompanyStats { active_jobs: 2, total_applications: 3, shortlisted: 1, selected: 1 });
}

// =============================================================================
// placement_stats
// =============================================================================

#[test]
fn placement_stats_aggregates_everything() {
    let students = vec![student(true, true), student(true, false), student(false, false)];
    let companies = vec![company(true), company(false)];
    let jobs = vec![listing(true), listing(false)];
    let stats = placement_stats(&students, &companies, &jobs);
    assert_eq!(stats.students, 3);
    assert_eq!(stats.verified_students, 2);
    assert_eq!(stats.placed_students, 1);
    assert_eq!(stats.placement_rate, 33);
    assert_eq!(stats.companies, 2);
    assert_eq!(stats.verified_companies, 1);
    assert_eq!(stats.active_jobs, 1);
    assert_eq!(stats.total_jobs, 2);
}

#[test]
fn placement_rate_is_zero_without_students() {
    let stats = placement_stats(&[], &[company(true)], &[]);
    assert_eq!(stats.placement_rate, 0);
    assert_eq!(stats.students, 0);
}

#[test]
fn dashboard_error_is_transparent() {
    let err = DashboardError::from(ProfileError::NotFound(Uuid::nil()));
    assert!(err.to_string().starts_with("profile not found"));
}

//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on gate evaluation, extraction, and status
//! mapping.

pub mod announcement;
pub mod application;
pub mod dashboard;
pub mod email_auth;
pub mod job;
pub mod profile;
pub mod session;

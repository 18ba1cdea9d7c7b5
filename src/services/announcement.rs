//! Announcements published by the placement office.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::gate::Role;

#[derive(Debug, thiserror::Error)]
pub enum AnnouncementError {
    #[error("announcement title and content are required")]
    MissingField,
    #[error("unknown target audience: {0}")]
    InvalidAudience(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Role tag; absent or blank targets everyone.
    #[serde(default)]
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub target_audience: Option<Role>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub target_audience: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<String>,
}

impl AnnouncementBody {
    /// # Errors
    ///
    /// `MissingField` for a blank title or content, `InvalidAudience` for an
    /// audience that is not a known role.
    pub fn parse(&self) -> Result<NewAnnouncement, AnnouncementError> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AnnouncementError::MissingField);
        }
        let target_audience = match self.target_audience.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(Role::known(tag).ok_or_else(|| AnnouncementError::InvalidAudience(tag.to_owned()))?),
        };
        Ok(NewAnnouncement { title: title.to_owned(), content: content.to_owned(), target_audience })
    }
}

/// Publish an announcement.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create(pool: &PgPool, author: Uuid, new: &NewAnnouncement) -> Result<Announcement, AnnouncementError> {
    let row = sqlx::query_as::<_, Announcement>(
        r"INSERT INTO announcements (title, content, target_audience, created_by)
          VALUES ($1, $2, $3::app_role, $4)
          RETURNING id, title, content, target_audience::text AS target_audience, created_by,
                    to_char(created_at, 'YYYY-MM-DD HH24:MI') AS created_at",
    )
    .bind(&new.title)
    .bind(&new.content)
    .bind(new.target_audience.as_ref().map(Role::as_str))
    .bind(author)
    .fetch_one(pool)
    .await?;

    info!(announcement_id = %row.id, audience = ?row.target_audience, "announcement published");
    Ok(row)
}

/// Active announcements visible to `role`, newest first. Placement heads see
/// every active announcement; other roles see those targeted at them or at
/// everyone.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_visible(pool: &PgPool, role: Option<&Role>) -> Result<Vec<Announcement>, AnnouncementError> {
    let see_all = matches!(role, Some(Role::PlacementHead));
    let rows = sqlx::query_as::<_, Announcement>(
        r"SELECT id, title, content, target_audience::text AS target_audience, created_by,
                 to_char(created_at, 'YYYY-MM-DD HH24:MI') AS created_at
          FROM announcements
          WHERE is_active
            AND ($1 OR target_audience IS NULL OR target_audience::text = $2)
          ORDER BY announcements.created_at DESC",
    )
    .bind(see_all)
    .bind(role.map(Role::as_str))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
#[path = "announcement_test.rs"]
mod tests;

//! Project model and DTOs.

use folio_core::error::CoreError;
use folio_core::types::{DbId, Timestamp};
use folio_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
    pub created_at: Timestamp,
}

/// Request body for creating or replacing a project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<String>,
    pub link: Option<String>,
}

/// A validated project record ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
}

impl ProjectPayload {
    /// Require a non-blank `title`; optional fields default to `""`.
    pub fn validate(self) -> Result<NewProject, CoreError> {
        let title = non_blank(self.title.as_deref())
            .ok_or_else(|| CoreError::Validation("Title is required".into()))?
            .to_string();

        Ok(NewProject {
            title,
            description: self.description.unwrap_or_default(),
            technologies: self.technologies.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
        })
    }
}

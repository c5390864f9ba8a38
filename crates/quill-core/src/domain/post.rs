use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post. Stored as two names, displayed as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"{first_name} {last_name}"`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Post entity - a single blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a fresh id and creation timestamp.
    ///
    /// Every field, including both author names, must be non-blank.
    pub fn new(author: Author, title: String, content: String) -> Result<Self, DomainError> {
        require_text("author.firstName", &author.first_name)?;
        require_text("author.lastName", &author.last_name)?;
        require_text("title", &title)?;
        require_text("content", &content)?;

        Ok(Self {
            id: Uuid::new_v4(),
            author,
            title,
            content,
            created: Utc::now(),
        })
    }

    /// Apply a partial update. `id`, `author` and `created` are never touched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
    }
}

/// The updatable subset of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// Validate the fields that are present. Absent fields are left alone.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        if let Some(title) = &title {
            require_text("title", title)?;
        }
        if let Some(content) = &content {
            require_text("content", content)?;
        }
        Ok(Self { title, content })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("`{field}` must not be empty")));
    }
    Ok(())
}

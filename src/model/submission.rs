use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{require, EntityId};
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Recipe,
    Story,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Recipe => "recipe",
            SubmissionType::Story => "story",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionType::Recipe => "Recipe",
            SubmissionType::Story => "Story",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "recipe" => Some(SubmissionType::Recipe),
            "story" => Some(SubmissionType::Story),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recipe or story proposed by a reader, kept apart from the catalog.
///
/// Only `processed` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: EntityId,
    pub submission_type: SubmissionType,
    pub name: String,
    pub email: String,
    pub title: String,
    pub description: String,
    /// Free text as typed by the submitter
    pub region: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub processed: bool,
}

/// Raw submission form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionDraft {
    pub submission_type: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub region: String,
    pub content: String,
}

impl SubmissionDraft {
    /// Validate the form and build an unsaved submission
    pub fn into_submission(self, now: DateTime<Utc>) -> Result<ContactSubmission, CatalogError> {
        let submission_type = SubmissionType::from_token(self.submission_type.trim())
            .ok_or_else(|| {
                CatalogError::validation(format!(
                    "unknown submission type '{}'",
                    self.submission_type
                ))
            })?;
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("region", &self.region)?;
        require("content", &self.content)?;

        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(CatalogError::validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        Ok(ContactSubmission {
            id: 0,
            submission_type,
            name: self.name.trim().to_string(),
            email: email.to_string(),
            title: self.title.trim().to_string(),
            description: self.description,
            region: self.region.trim().to_string(),
            content: self.content,
            created_at: now,
            processed: false,
        })
    }
}

/// `local@domain.tld` with no whitespace
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}

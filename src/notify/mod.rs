mod factory;
mod log_notifier;
mod mail_relay;

pub use factory::NotifierFactory;
pub use log_notifier::LogNotifier;
pub use mail_relay::MailRelayNotifier;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::ContactSubmission;

/// Errors raised while delivering a notification.
///
/// The catalog logs these and carries on; they never fail a submission.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The relay could not be reached
    #[error("Failed to reach mail relay: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("Mail relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The notifier is missing required settings
    #[error("Notifier misconfigured: {0}")]
    Misconfigured(String),
}

/// Unified trait for operator notification channels
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Get the notifier name (e.g., "log", "mail_relay")
    fn notifier_name(&self) -> &str;

    /// Tell the operator about a new submission
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError>;
}

/// The operator-facing message for a new submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionNotice {
    pub subject: String,
    pub body: String,
}

impl From<&ContactSubmission> for SubmissionNotice {
    fn from(submission: &ContactSubmission) -> Self {
        SubmissionNotice {
            subject: format!("New submission: {}", submission.title),
            body: format!(
                "New submission from {} ({})\n\n\
                 Type: {}\n\
                 Title: {}\n\
                 Region: {}\n\n\
                 Description: {}",
                submission.name,
                submission.email,
                submission.submission_type.label(),
                submission.title,
                submission.region,
                submission.description,
            ),
        }
    }
}

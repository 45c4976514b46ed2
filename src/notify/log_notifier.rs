use async_trait::async_trait;
use log::info;

use super::{Notifier, NotifyError, SubmissionNotice};
use crate::model::ContactSubmission;

/// Writes submission notices to the log instead of sending them
pub struct LogNotifier {
    operator_address: String,
}

impl LogNotifier {
    pub fn new(operator_address: impl Into<String>) -> Self {
        Self {
            operator_address: operator_address.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn notifier_name(&self) -> &str {
        "log"
    }

    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let notice = SubmissionNotice::from(submission);
        info!(
            "Notice for {}: {}\n{}",
            self.operator_address, notice.subject, notice.body
        );
        Ok(())
    }
}

use async_trait::async_trait;
use html_escape::encode_text;
use log::debug;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::{Notifier, NotifyError, SubmissionNotice};
use crate::config::NotificationConfig;
use crate::model::ContactSubmission;

/// Delivers submission notices through an HTTP mail relay.
///
/// The relay receives `{from, to, subject, text, html}` as JSON.
pub struct MailRelayNotifier {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    from_address: String,
    operator_address: String,
}

impl MailRelayNotifier {
    /// Create a new relay notifier from configuration
    pub fn new(config: &NotificationConfig) -> Result<Self, NotifyError> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                NotifyError::Misconfigured("mail relay endpoint is not set".to_string())
            })?;

        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("MESA_RELAY_API_KEY").ok());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(MailRelayNotifier {
            client,
            endpoint,
            api_key,
            from_address: config.from_address.clone(),
            operator_address: config.operator_address.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_endpoint(endpoint: String, operator_address: String) -> Self {
        MailRelayNotifier {
            client: Client::new(),
            endpoint,
            api_key: None,
            from_address: "noreply@mesaglobal.com".to_string(),
            operator_address,
        }
    }

    fn html_body(body: &str) -> String {
        let escaped = encode_text(body);
        format!("<pre>{}</pre>", escaped)
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    fn notifier_name(&self) -> &str {
        "mail_relay"
    }

    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let notice = SubmissionNotice::from(submission);

        let mut request = self.client.post(&self.endpoint).json(&json!({
            "from": self.from_address,
            "to": [self.operator_address],
            "subject": notice.subject,
            "text": notice.body,
            "html": Self::html_body(&notice.body),
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Mail relay answered {} for submission {}", status, submission.id);

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

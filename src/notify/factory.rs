use crate::config::{NotificationConfig, NotifierKind};
use crate::notify::{LogNotifier, MailRelayNotifier, Notifier, NotifyError};

pub struct NotifierFactory;

impl NotifierFactory {
    /// Create the notifier selected by configuration
    pub fn create(config: &NotificationConfig) -> Result<Box<dyn Notifier>, NotifyError> {
        match config.kind {
            NotifierKind::Log => Ok(Box::new(LogNotifier::new(
                config.operator_address.clone(),
            ))),
            NotifierKind::MailRelay => Ok(Box::new(MailRelayNotifier::new(config)?)),
        }
    }

    /// List all available notifier names
    pub fn available_notifiers() -> Vec<&'static str> {
        vec!["log", "mail_relay"]
    }
}

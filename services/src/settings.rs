use std::time::Duration;
use tracing::warn;
use util::config::AppConfig;

/// Knobs the lifecycle and practical services read on every call.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// Extension applied when a submission or practical does not name one. Leading dot included.
    pub default_extension: String,
    /// Upper bound on a single notification delivery.
    pub notify_timeout: Duration,
    /// Signature used in notification e-mails.
    pub portal_name: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            default_extension: ".py".into(),
            notify_timeout: Duration::from_secs(10),
            portal_name: "Code Portal".into(),
        }
    }
}

impl LifecycleSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let default_extension = match crate::naming::normalize_extension(&config.default_extension) {
            Some(ext) => ext,
            None => {
                warn!(
                    configured = %config.default_extension,
                    "DEFAULT_EXTENSION is not a valid extension, falling back to .py"
                );
                Self::default().default_extension
            }
        };

        Self {
            default_extension,
            notify_timeout: Duration::from_secs(config.notify_timeout_secs),
            portal_name: config.email_from_name.clone(),
        }
    }
}

//! Email the host when their invite gets answered.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use thiserror::Error;

use valentine_types::api::SelectionRecord;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid SMTP configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Something that tells the host about a new selection.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn selection_made(&self, to: &str, record: &SelectionRecord) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: String,
    pub from_name: Option<String>,
    pub use_tls: bool,
}

impl SmtpConfig {
    /// Read `SMTP_*` variables. Notifications stay off unless both
    /// `SMTP_HOST` and `SMTP_FROM_EMAIL` are set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("SMTP_HOST")?;
        let from_email = non_empty("SMTP_FROM_EMAIL")?;

        Some(Self {
            host,
            port: non_empty("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: non_empty("SMTP_USERNAME").or_else(|| non_empty("SMTP_USER")),
            password: non_empty("SMTP_PASSWORD"),
            from_email,
            from_name: non_empty("SMTP_FROM_NAME"),
            use_tls: non_empty("SMTP_USE_TLS")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }
}

/// Subject and plain-text body of the notification.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEmail {
    pub subject: String,
    pub body: String,
}

pub fn compose(record: &SelectionRecord) -> SelectionEmail {
    let who = record.recipient_name.as_deref().unwrap_or("Your Valentine");
    let title = &record.activity_title;
    let message = record
        .activity_response
        .as_deref()
        .unwrap_or("No custom message provided.");

    let body = [
        "Hi there!".to_string(),
        String::new(),
        format!(
            "{} just chose \"{}\" ({}) for your Valentine's adventure.",
            who, title, record.activity_emoji
        ),
        String::new(),
        "Message shown to them:".to_string(),
        message.to_string(),
        String::new(),
        format!("Recorded at: {}", record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        "Check the Activity Log for more details.".to_string(),
        String::new(),
        "With love,".to_string(),
        "Your Valentine App 💞".to_string(),
    ]
    .join("\n");

    SelectionEmail {
        subject: format!("{} picked {}! 💌", who, title),
        body,
    }
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let host = config.host.as_str();
        let mut builder = if config.use_tls {
            let tls = TlsParameters::new(host.to_string())
                .map_err(|e| NotifyError::InvalidConfig(format!("TLS: {}", e)))?;

            // 465 is implicit TLS, anything else upgrades with STARTTLS.
            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| NotifyError::InvalidConfig(e.to_string()))?
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| NotifyError::InvalidConfig(e.to_string()))?
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };

        builder = builder.port(config.port).timeout(Some(SMTP_TIMEOUT));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = Mailbox::new(
            config.from_name.clone(),
            config
                .from_email
                .parse()
                .map_err(|e| NotifyError::InvalidConfig(format!("from address: {}", e)))?,
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn selection_made(&self, to: &str, record: &SelectionRecord) -> Result<(), NotifyError> {
        let email = compose(record);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| NotifyError::SendFailed(format!("invalid recipient: {}", e)))?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| NotifyError::SendFailed(format!("building message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

// src/notify.rs
//! Email composition and delivery.
//!
//! [`EmailMessage`] is built once per triggered run: the runner fills in the
//! envelope (`From`, `To`), the spec fills in subject and body. A [`Mailer`]
//! hands it to a relay. [`SmtpMailer`] is the production one; tests provide
//! their own.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;
use crate::error::DeliveryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: Address,
    pub to: Vec<Address>,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Envelope only; subject and body are left for the spec to render.
    pub fn new(from: Address, to: &[Address]) -> Self {
        Self { from, to: to.to_vec(), subject: String::new(), body: String::new() }
    }

    /// `To` header value: recipients joined with ", ".
    pub fn to_header(&self) -> String {
        self.to.iter().map(Address::to_string).collect::<Vec<_>>().join(", ")
    }

    pub fn to_lettre(&self) -> Result<Message, DeliveryError> {
        let mut builder = Message::builder()
            .from(Mailbox::new(None, self.from.clone()))
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        for rcpt in &self.to {
            builder = builder.to(Mailbox::new(None, rcpt.clone()));
        }
        Ok(builder.body(self.body.clone())?)
    }
}

/// Sends exactly one message per call.
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// SMTP over implicit TLS (SMTPS) with login.
///
/// Each `send` opens its own session, authenticates, sends, and closes it.
/// The transport is dropped at the end of the call whether the send worked
/// or not, so no connection outlives the message.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let email = message.to_lettre()?;

        let SmtpConfig { host, port, user, password } = &self.config;
        logd!("SMTP: connecting to {}:{} as {}", host, port, user);

        let transport = SmtpTransport::relay(host)?
            .port(*port)
            .credentials(Credentials::new(user.clone(), password.clone()))
            .build();

        let response = transport.send(&email)?;
        logd!("SMTP: relay answered {}", response.code());
        Ok(())
    }
}

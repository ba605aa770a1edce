use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mensaje inválido: {0}")]
    Build(String),
    #[error("transporte SMTP: {0}")]
    Transport(String),
}

#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
    /// When set, the attachment is embedded inline and referenced from the
    /// HTML body as `cid:<value>`.
    pub inline_cid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<MailAttachment>,
}

/// Outbound mail seam. The workflows only ever see this trait, so tests
/// can swap in a recording implementation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Build(e.to_string()))?;
        Ok(SmtpMailer { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let to = mail.to.clone();
        let message = build_message(&self.from, mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        tracing::info!(to = %to, "correo enviado");
        Ok(())
    }
}

fn build_message(from: &Mailbox, mail: OutgoingMail) -> Result<Message, MailError> {
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::Build(e.to_string()))?;

    // Inline attachments live in a `related` part next to the HTML body;
    // regular attachments wrap the whole thing in a `mixed` part.
    let mut related = MultiPart::related().singlepart(SinglePart::html(mail.html));
    let mut regular: Vec<SinglePart> = Vec::new();
    for attachment in mail.attachments {
        let content_type = ContentType::parse(&attachment.content_type)
            .map_err(|e| MailError::Build(e.to_string()))?;
        match attachment.inline_cid {
            Some(cid) => {
                related = related
                    .singlepart(Attachment::new_inline(cid).body(attachment.content, content_type));
            }
            None => {
                regular.push(
                    Attachment::new(attachment.filename).body(attachment.content, content_type),
                );
            }
        }
    }

    let body = if regular.is_empty() {
        related
    } else {
        let mut mixed = MultiPart::mixed().multipart(related);
        for part in regular {
            mixed = mixed.singlepart(part);
        }
        mixed
    };

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject)
        .multipart(body)
        .map_err(|e| MailError::Build(e.to_string()))
}

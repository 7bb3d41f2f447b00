//! Notification Gateway
//!
//! 邮件发送能力抽象。预订流程只依赖 [`Mailer`] trait，具体投递
//! 方式可注入：
//!
//! - [`SmtpMailer`] - lettre SMTP 投递 (生产)
//! - [`LogMailer`] - 只写日志 (开发默认)
//! - [`RecordingMailer`] - 记录到内存 (测试替身)
//!
//! 投递失败从不回滚已提交的预订写入，也从不向 API 调用方暴露。

pub mod messages;
pub mod smtp;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

pub use smtp::SmtpMailer;

/// Mail delivery error
#[derive(Debug, Error)]
#[error("Mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Outbound email capability
///
/// One attempt per send; the caller decides whether failure matters
/// (in this system it never does — log and move on).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, subject: &str, body: &str, to: &str) -> Result<(), MailError>;
}

/// Send an email, logging failure instead of surfacing it
///
/// The reservation is considered successfully processed regardless of
/// delivery outcome (booking correctness does not depend on an
/// unreliable side channel).
pub async fn send_fire_and_forget(mailer: &dyn Mailer, subject: &str, body: &str, to: &str) {
    if let Err(e) = mailer.send(subject, body, to).await {
        tracing::warn!(to = %to, subject = %subject, error = %e, "Notification delivery failed");
    }
}

/// Dev-default mailer: logs the message instead of delivering it
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, subject: &str, body: &str, to: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = %subject, body = %body, "Email (log-only delivery)");
        Ok(())
    }
}

/// A sent message captured by [`RecordingMailer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
    pub to: String,
}

/// Test double that records every send
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, subject: &str, body: &str, to: &str) -> Result<(), MailError> {
        self.sent.lock().expect("mailer mutex poisoned").push(SentMail {
            subject: subject.to_string(),
            body: body.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }
}

//! Email API
//!
//! Payloads for sending and inspecting emails.

use crate::api::common::Recipients;
use serde::{Deserialize, Serialize};

/// Body of `POST /emails`
///
/// Optional fields left as `None` are not serialized at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    /// Sender address; must belong to a verified domain
    pub from: String,

    pub to: Recipients,

    pub subject: String,

    pub html: String,

    /// Plain text fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Recipients>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Recipients>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Recipients>,

    /// ISO 8601 delivery time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl SendEmailRequest {
    /// Create a request with the required fields
    pub fn new(
        from: impl Into<String>,
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            text: None,
            cc: None,
            bcc: None,
            reply_to: None,
            scheduled_at: None,
        }
    }

    /// Set the plain text body
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_cc(mut self, cc: impl Into<Recipients>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    pub fn with_bcc(mut self, bcc: impl Into<Recipients>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<Recipients>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Schedule delivery
    pub fn with_scheduled_at(mut self, scheduled_at: impl Into<String>) -> Self {
        self.scheduled_at = Some(scheduled_at.into());
        self
    }
}

/// Reply to `POST /emails`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendEmailResponse {
    pub id: String,
}

/// A sent or scheduled email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub id: String,

    pub from: String,

    pub to: Vec<String>,

    pub subject: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub created_at: String,

    /// Latest delivery event, e.g. "delivered" or "bounced"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<String>,
}

//! Tool Arguments
//!
//! Argument types accepted by each tool and the JSON schemas advertised for
//! them. Keys are camelCase on the tool side and snake_case on the wire.

use crate::api::{CreateContactRequest, Recipients, SendEmailRequest, UpdateContactRequest};
use crate::error::{ResendError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Parse tool arguments; `null` is treated as an empty object
pub fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ResendError::InvalidArguments(e.to_string()))
}

/// Reject empty identifiers before they turn into a different path
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ResendError::InvalidArguments(format!(
            "`{}` must not be empty",
            field
        )));
    }
    Ok(())
}

/// Empty optional strings count as not supplied
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_recipients(value: Option<Recipients>) -> Option<Recipients> {
    value.filter(|r| !r.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailArgs {
    pub from: String,
    pub to: Recipients,
    pub subject: String,
    pub html: String,
    pub text: Option<String>,
    pub cc: Option<Recipients>,
    pub bcc: Option<Recipients>,
    pub reply_to: Option<Recipients>,
    pub scheduled_at: Option<String>,
}

impl SendEmailArgs {
    pub fn into_request(self) -> Result<SendEmailRequest> {
        require("from", &self.from)?;
        if self.to.is_empty() {
            return Err(ResendError::InvalidArguments(
                "`to` must name at least one recipient".to_string(),
            ));
        }

        Ok(SendEmailRequest {
            from: self.from,
            to: self.to,
            subject: self.subject,
            html: self.html,
            text: non_empty(self.text),
            cc: non_empty_recipients(self.cc),
            bcc: non_empty_recipients(self.bcc),
            reply_to: non_empty_recipients(self.reply_to),
            scheduled_at: non_empty(self.scheduled_at),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailIdArgs {
    pub email_id: String,
}

impl EmailIdArgs {
    pub fn validate(&self) -> Result<()> {
        require("emailId", &self.email_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactArgs {
    pub audience_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub unsubscribed: Option<bool>,
}

impl CreateContactArgs {
    pub fn into_request(self) -> Result<(String, CreateContactRequest)> {
        require("audienceId", &self.audience_id)?;
        require("email", &self.email)?;
        Ok((
            self.audience_id,
            CreateContactRequest {
                email: self.email,
                first_name: non_empty(self.first_name),
                last_name: non_empty(self.last_name),
                unsubscribed: self.unsubscribed,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRefArgs {
    pub audience_id: String,
    pub contact_id: String,
}

impl ContactRefArgs {
    pub fn validate(&self) -> Result<()> {
        require("audienceId", &self.audience_id)?;
        require("contactId", &self.contact_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactArgs {
    pub audience_id: String,
    pub contact_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub unsubscribed: Option<bool>,
}

impl UpdateContactArgs {
    pub fn into_request(self) -> Result<(String, String, UpdateContactRequest)> {
        require("audienceId", &self.audience_id)?;
        require("contactId", &self.contact_id)?;
        Ok((
            self.audience_id,
            self.contact_id,
            UpdateContactRequest {
                email: non_empty(self.email),
                first_name: non_empty(self.first_name),
                last_name: non_empty(self.last_name),
                unsubscribed: self.unsubscribed,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceIdArgs {
    pub audience_id: String,
}

impl AudienceIdArgs {
    pub fn validate(&self) -> Result<()> {
        require("audienceId", &self.audience_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAudienceArgs {
    pub name: String,
}

impl CreateAudienceArgs {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainIdArgs {
    pub domain_id: String,
}

impl DomainIdArgs {
    pub fn validate(&self) -> Result<()> {
        require("domainId", &self.domain_id)
    }
}

// ----------------------------------------------------------------------
// JSON schemas
// ----------------------------------------------------------------------

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn string_or_list(description: &str) -> Value {
    json!({
        "anyOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ],
        "description": description
    })
}

fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub fn empty() -> Value {
    object(json!({}), &[])
}

pub fn send_email() -> Value {
    object(
        json!({
            "from": string("Sender email address (must be from a verified domain)"),
            "to": string_or_list("Recipient email address(es)"),
            "subject": string("Email subject line"),
            "html": string("HTML content of the email"),
            "text": string("Plain text fallback content"),
            "cc": string_or_list("CC recipient(s)"),
            "bcc": string_or_list("BCC recipient(s)"),
            "replyTo": string_or_list("Reply-to address(es)"),
            "scheduledAt": string("When to deliver, e.g. an ISO 8601 timestamp or \"in 1 hour\""),
        }),
        &["from", "to", "subject", "html"],
    )
}

pub fn get_email() -> Value {
    object(
        json!({ "emailId": string("Email ID returned from send operation") }),
        &["emailId"],
    )
}

pub fn create_contact() -> Value {
    object(
        json!({
            "audienceId": string("Audience ID to add the contact to"),
            "email": string("Contact email address"),
            "firstName": string("Contact first name"),
            "lastName": string("Contact last name"),
            "unsubscribed": boolean("Whether the contact is unsubscribed"),
        }),
        &["audienceId", "email"],
    )
}

fn contact_ref(contact_description: &str) -> Value {
    object(
        json!({
            "audienceId": string("Audience ID containing the contact"),
            "contactId": string(contact_description),
        }),
        &["audienceId", "contactId"],
    )
}

pub fn update_contact() -> Value {
    object(
        json!({
            "audienceId": string("Audience ID containing the contact"),
            "contactId": string("Contact ID to update"),
            "email": string("Updated email address"),
            "firstName": string("Updated first name"),
            "lastName": string("Updated last name"),
            "unsubscribed": boolean("Updated subscription status"),
        }),
        &["audienceId", "contactId"],
    )
}

fn audience_id(description: &str) -> Value {
    object(json!({ "audienceId": string(description) }), &["audienceId"])
}

pub fn get_contact() -> Value {
    contact_ref("Contact ID")
}

pub fn delete_contact() -> Value {
    contact_ref("Contact ID to delete")
}

pub fn list_contacts() -> Value {
    audience_id("Audience ID to list contacts from")
}

pub fn get_audience() -> Value {
    audience_id("Audience ID")
}

pub fn delete_audience() -> Value {
    audience_id("Audience ID to delete")
}

pub fn create_audience() -> Value {
    object(json!({ "name": string("Audience name") }), &["name"])
}

pub fn domain_id() -> Value {
    object(json!({ "domainId": string("Domain ID") }), &["domainId"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_email_args_drop_empty_optionals() {
        let args: SendEmailArgs = parse(json!({
            "from": "a@example.com",
            "to": "b@example.com",
            "subject": "Hi",
            "html": "<p>Hi</p>",
            "text": "",
            "replyTo": ["c@example.com"]
        }))
        .unwrap();

        let request = args.into_request().unwrap();
        assert!(request.text.is_none());
        assert_eq!(request.reply_to, Some(Recipients::Many(vec!["c@example.com".to_string()])));
    }

    #[test]
    fn test_missing_required_field() {
        let result: Result<SendEmailArgs> = parse(json!({ "from": "a@example.com" }));
        assert!(matches!(result, Err(ResendError::InvalidArguments(_))));
    }

    #[test]
    fn test_scheduled_at_is_forwarded_verbatim() {
        for at in ["in 1 min", "2026-11-01T09:30:00", "2026-11-01", "2026-11-01T09:30:00+02:00"] {
            let args: SendEmailArgs = parse(json!({
                "from": "a@example.com",
                "to": "b@example.com",
                "subject": "Hi",
                "html": "<p>Hi</p>",
                "scheduledAt": at
            }))
            .unwrap();
            assert_eq!(args.into_request().unwrap().scheduled_at.as_deref(), Some(at));
        }

        let args: SendEmailArgs = parse(json!({
            "from": "a@example.com",
            "to": "b@example.com",
            "subject": "Hi",
            "html": "<p>Hi</p>",
            "scheduledAt": ""
        }))
        .unwrap();
        assert_eq!(args.into_request().unwrap().scheduled_at, None);
    }

    #[test]
    fn test_null_arguments_are_empty_object() {
        let result: Result<AudienceIdArgs> = parse(Value::Null);
        assert!(result.is_err());

        #[derive(Deserialize)]
        struct NoArgs {}
        assert!(parse::<NoArgs>(Value::Null).is_ok());
    }

    #[test]
    fn test_empty_ids_rejected() {
        let args: ContactRefArgs = parse(json!({ "audienceId": "a", "contactId": " " })).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = send_email();
        assert_eq!(schema["required"], json!(["from", "to", "subject", "html"]));
        assert_eq!(schema["properties"]["replyTo"]["anyOf"][1]["type"], "array");
        assert_eq!(empty()["properties"], json!({}));
    }
}

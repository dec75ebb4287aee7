//! Tools Module
//!
//! The catalogue of agent-callable tools. Each tool wraps one
//! [`ResendClient`] method and reports its outcome as a text envelope rather
//! than an error, so the calling agent always gets a readable answer.

pub mod schema;

use crate::error::{ResendError, Result};
use crate::ResendClient;
use schema::{
    AudienceIdArgs, ContactRefArgs, CreateAudienceArgs, CreateContactArgs, DomainIdArgs,
    EmailIdArgs, SendEmailArgs, UpdateContactArgs,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// A tool as advertised to the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,

    pub description: String,

    /// JSON schema of the arguments object
    pub input_schema: Value,
}

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Uniform success/failure envelope for a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    /// Pretty-printed JSON payload
    pub fn success(payload: &Value) -> Self {
        let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: false,
        }
    }

    /// `Error: <message>` flagged as an error
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: format!("Error: {}", message),
            }],
            is_error: true,
        }
    }

    /// Concatenated text of all blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Static description of one tool
struct ToolSpec {
    name: &'static str,
    description: &'static str,
    schema: fn() -> Value,
}

const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "resend_send_email",
        description: "Send an email via Resend. Supports HTML/text content, CC, BCC, reply-to, and scheduled delivery.",
        schema: schema::send_email,
    },
    ToolSpec {
        name: "resend_get_email",
        description: "Get email details and delivery status by ID.",
        schema: schema::get_email,
    },
    ToolSpec {
        name: "resend_list_emails",
        description: "List all sent emails.",
        schema: schema::empty,
    },
    ToolSpec {
        name: "resend_create_contact",
        description: "Create a new contact in an audience.",
        schema: schema::create_contact,
    },
    ToolSpec {
        name: "resend_get_contact",
        description: "Get contact details by ID.",
        schema: schema::get_contact,
    },
    ToolSpec {
        name: "resend_update_contact",
        description: "Update contact properties.",
        schema: schema::update_contact,
    },
    ToolSpec {
        name: "resend_delete_contact",
        description: "Delete a contact from an audience.",
        schema: schema::delete_contact,
    },
    ToolSpec {
        name: "resend_list_contacts",
        description: "List all contacts in an audience.",
        schema: schema::list_contacts,
    },
    ToolSpec {
        name: "resend_create_audience",
        description: "Create a new audience for organizing contacts.",
        schema: schema::create_audience,
    },
    ToolSpec {
        name: "resend_get_audience",
        description: "Get audience details by ID.",
        schema: schema::get_audience,
    },
    ToolSpec {
        name: "resend_list_audiences",
        description: "List all audiences.",
        schema: schema::empty,
    },
    ToolSpec {
        name: "resend_delete_audience",
        description: "Delete an audience.",
        schema: schema::delete_audience,
    },
    ToolSpec {
        name: "resend_get_domain",
        description: "Get domain verification status and details.",
        schema: schema::domain_id,
    },
    ToolSpec {
        name: "resend_list_domains",
        description: "List all verified domains.",
        schema: schema::empty,
    },
];

/// Dispatches tool calls to a shared client
#[derive(Clone)]
pub struct ToolRegistry {
    client: Arc<ResendClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<ResendClient>) -> Self {
        Self { client }
    }

    /// Get the client
    pub fn client(&self) -> &Arc<ResendClient> {
        &self.client
    }

    /// All tools with their schemas
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        TOOLS
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name.to_string(),
                description: tool.description.to_string(),
                input_schema: (tool.schema)(),
            })
            .collect()
    }

    /// Check if a tool with this name exists
    pub fn contains(&self, name: &str) -> bool {
        TOOLS.iter().any(|tool| tool.name == name)
    }

    /// Run a tool; failures come back as an error envelope
    pub async fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        info!(tool = name, "tool call");
        match self.run(name, arguments).await {
            Ok(payload) => ToolOutput::success(&payload),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                ToolOutput::failure(e)
            }
        }
    }

    async fn run(&self, name: &str, arguments: Value) -> Result<Value> {
        let client = &self.client;

        let payload = match name {
            "resend_send_email" => {
                let request = schema::parse::<SendEmailArgs>(arguments)?.into_request()?;
                let sent = client.send_email(&request).await?;
                json!({ "success": true, "emailId": sent.id })
            }
            "resend_get_email" => {
                let args: EmailIdArgs = schema::parse(arguments)?;
                args.validate()?;
                serde_json::to_value(client.get_email(&args.email_id).await?)?
            }
            "resend_list_emails" => {
                let list = client.list_emails().await?;
                json!({ "total": list.len(), "emails": list.data })
            }
            "resend_create_contact" => {
                let (audience_id, request) =
                    schema::parse::<CreateContactArgs>(arguments)?.into_request()?;
                let contact = client.create_contact(&audience_id, &request).await?;
                json!({ "success": true, "contact": contact })
            }
            "resend_get_contact" => {
                let args: ContactRefArgs = schema::parse(arguments)?;
                args.validate()?;
                serde_json::to_value(client.get_contact(&args.audience_id, &args.contact_id).await?)?
            }
            "resend_update_contact" => {
                let (audience_id, contact_id, request) =
                    schema::parse::<UpdateContactArgs>(arguments)?.into_request()?;
                let contact = client
                    .update_contact(&audience_id, &contact_id, &request)
                    .await?;
                json!({ "success": true, "contact": contact })
            }
            "resend_delete_contact" => {
                let args: ContactRefArgs = schema::parse(arguments)?;
                args.validate()?;
                let deleted = client
                    .delete_contact(&args.audience_id, &args.contact_id)
                    .await?;
                json!({ "success": true, "deleted": deleted })
            }
            "resend_list_contacts" => {
                let args: AudienceIdArgs = schema::parse(arguments)?;
                args.validate()?;
                let list = client.list_contacts(&args.audience_id).await?;
                json!({ "total": list.len(), "contacts": list.data })
            }
            "resend_create_audience" => {
                let args: CreateAudienceArgs = schema::parse(arguments)?;
                args.validate()?;
                let audience = client.create_audience(&args.name).await?;
                json!({ "success": true, "audience": audience })
            }
            "resend_get_audience" => {
                let args: AudienceIdArgs = schema::parse(arguments)?;
                args.validate()?;
                serde_json::to_value(client.get_audience(&args.audience_id).await?)?
            }
            "resend_list_audiences" => {
                let list = client.list_audiences().await?;
                json!({ "total": list.len(), "audiences": list.data })
            }
            "resend_delete_audience" => {
                let args: AudienceIdArgs = schema::parse(arguments)?;
                args.validate()?;
                let deleted = client.delete_audience(&args.audience_id).await?;
                json!({ "success": true, "deleted": deleted })
            }
            "resend_get_domain" => {
                let args: DomainIdArgs = schema::parse(arguments)?;
                args.validate()?;
                serde_json::to_value(client.get_domain(&args.domain_id).await?)?
            }
            "resend_list_domains" => {
                let list = client.list_domains().await?;
                json!({ "total": list.len(), "domains": list.data })
            }
            _ => {
                return Err(ResendError::InvalidArguments(format!(
                    "Unknown tool '{}'",
                    name
                )))
            }
        };

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ClientConfig};

    fn registry_for(url: &str) -> ToolRegistry {
        let config = ClientConfig::new(ApiKey::new("re_test").unwrap()).with_base_url(url);
        ToolRegistry::new(Arc::new(ResendClient::new(config).unwrap()))
    }

    fn payload(output: &ToolOutput) -> Value {
        serde_json::from_str(&output.text()).unwrap()
    }

    #[test]
    fn test_definitions_cover_every_operation() {
        let registry = registry_for("http://localhost");
        let definitions = registry.definitions();

        assert_eq!(definitions.len(), 14);
        for definition in &definitions {
            assert!(definition.name.starts_with("resend_"));
            assert_eq!(definition.input_schema["type"], "object");
            assert!(registry.contains(&definition.name));
        }
        assert!(!registry.contains("resend_update_email"));
    }

    #[test]
    fn test_output_serialization() {
        let ok = serde_json::to_value(ToolOutput::success(&json!({"a": 1}))).unwrap();
        assert_eq!(ok["content"][0]["type"], "text");
        assert!(ok.get("isError").is_none());

        let failed = serde_json::to_value(ToolOutput::failure("boom")).unwrap();
        assert_eq!(failed["content"][0]["text"], "Error: boom");
        assert_eq!(failed["isError"], true);
    }

    #[tokio::test]
    async fn test_send_email_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/emails")
            .with_status(200)
            .with_body(r#"{"id":"em_42"}"#)
            .create_async()
            .await;

        let output = registry_for(&server.url())
            .call(
                "resend_send_email",
                json!({
                    "from": "a@example.com",
                    "to": "b@example.com",
                    "subject": "Hi",
                    "html": "<p>Hi</p>"
                }),
            )
            .await;

        assert!(!output.is_error);
        assert_eq!(payload(&output), json!({"success": true, "emailId": "em_42"}));
    }

    #[tokio::test]
    async fn test_list_envelope_has_total() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/audiences/aud_1/contacts")
            .with_status(200)
            .with_body(r#"{"data":[{"id":"c_1","email":"a@example.com"},{"id":"c_2","email":"b@example.com"}]}"#)
            .create_async()
            .await;

        let output = registry_for(&server.url())
            .call("resend_list_contacts", json!({"audienceId": "aud_1"}))
            .await;

        let value = payload(&output);
        assert_eq!(value["total"], 2);
        assert_eq!(value["contacts"][1]["id"], "c_2");
    }

    #[tokio::test]
    async fn test_update_contact_sends_only_supplied_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/audiences/aud_1/contacts/c_1")
            .match_body(mockito::Matcher::Json(json!({"unsubscribed": true})))
            .with_status(200)
            .with_body(r#"{"id":"c_1","email":"a@example.com","unsubscribed":true}"#)
            .create_async()
            .await;

        let output = registry_for(&server.url())
            .call(
                "resend_update_contact",
                json!({"audienceId": "aud_1", "contactId": "c_1", "unsubscribed": true}),
            )
            .await;

        mock.assert_async().await;
        assert_eq!(payload(&output)["contact"]["unsubscribed"], true);
    }

    #[tokio::test]
    async fn test_api_error_becomes_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/domains/nope")
            .with_status(404)
            .with_body(r#"{"message":"not found"}"#)
            .create_async()
            .await;

        let output = registry_for(&server.url())
            .call("resend_get_domain", json!({"domainId": "nope"}))
            .await;

        assert!(output.is_error);
        let text = output.text();
        assert!(text.starts_with("Error: Resend API error (404"));
        assert!(text.contains(r#"{"message":"not found"}"#));
    }

    #[tokio::test]
    async fn test_delete_no_content_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/audiences/aud_1")
            .with_status(204)
            .create_async()
            .await;

        let output = registry_for(&server.url())
            .call("resend_delete_audience", json!({"audienceId": "aud_1"}))
            .await;

        assert!(!output.is_error);
        assert_eq!(payload(&output), json!({"success": true, "deleted": {"deleted": false}}));
    }

    #[tokio::test]
    async fn test_invalid_arguments_do_not_reach_network() {
        // nothing listens here; a request would fail with a transport error
        let registry = registry_for("http://127.0.0.1:9");

        let output = registry.call("resend_get_email", json!({})).await;
        assert!(output.is_error);
        assert!(output.text().contains("Invalid arguments"));

        let output = registry.call("resend_bogus", json!({})).await;
        assert!(output.is_error);
        assert!(output.text().contains("Unknown tool"));
    }
}

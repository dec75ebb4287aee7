//! Resend MCP
//!
//! Typed client for the Resend email API with sliding window rate limiting
//! and 429 retry, exposed to agents as MCP tools over stdio.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;

use api::{
    Audience, Contact, CreateAudienceRequest, CreateContactRequest, DeleteResponse, Domain, Email,
    ListResponse, SendEmailRequest, SendEmailResponse, UpdateContactRequest,
};
use client::request::segment;
use client::{HttpClient, RateLimiter};
use config::{ClientConfig, ConfigLoader};
use std::sync::Arc;

pub use error::{ResendError, Result};

/// The main Resend client
///
/// Every method maps to one API call and goes through the shared rate
/// limiter.
pub struct ResendClient {
    http_client: HttpClient,
}

impl ResendClient {
    /// Create a client from a complete config
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http_client: HttpClient::new(&config)?,
        })
    }

    /// Create a client from config files and the environment
    ///
    /// Fails immediately when the API key is missing.
    pub fn from_env() -> Result<Self> {
        Self::new(ConfigLoader::new()?.into_config()?)
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the rate limiter shared by all calls
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        self.http_client.rate_limiter()
    }

    // ------------------------------------------------------------------
    // Emails
    // ------------------------------------------------------------------

    /// Send an email
    pub async fn send_email(&self, request: &SendEmailRequest) -> Result<SendEmailResponse> {
        self.http_client.post("/emails", request).await
    }

    /// Get an email and its delivery status
    pub async fn get_email(&self, email_id: &str) -> Result<Email> {
        self.http_client
            .get(&format!("/emails/{}", segment(email_id)))
            .await
    }

    /// List sent emails
    pub async fn list_emails(&self) -> Result<ListResponse<Email>> {
        self.http_client.get("/emails").await
    }

    // ------------------------------------------------------------------
    // Contacts
    // ------------------------------------------------------------------

    /// Add a contact to an audience
    pub async fn create_contact(
        &self,
        audience_id: &str,
        request: &CreateContactRequest,
    ) -> Result<Contact> {
        self.http_client
            .post(&contacts_path(audience_id), request)
            .await
    }

    pub async fn get_contact(&self, audience_id: &str, contact_id: &str) -> Result<Contact> {
        self.http_client
            .get(&contact_path(audience_id, contact_id))
            .await
    }

    /// Update the fields set in `request`
    pub async fn update_contact(
        &self,
        audience_id: &str,
        contact_id: &str,
        request: &UpdateContactRequest,
    ) -> Result<Contact> {
        self.http_client
            .patch(&contact_path(audience_id, contact_id), request)
            .await
    }

    pub async fn delete_contact(
        &self,
        audience_id: &str,
        contact_id: &str,
    ) -> Result<DeleteResponse> {
        self.http_client
            .delete(&contact_path(audience_id, contact_id))
            .await
    }

    pub async fn list_contacts(&self, audience_id: &str) -> Result<ListResponse<Contact>> {
        self.http_client.get(&contacts_path(audience_id)).await
    }

    // ------------------------------------------------------------------
    // Audiences
    // ------------------------------------------------------------------

    pub async fn create_audience(&self, name: &str) -> Result<Audience> {
        let request = CreateAudienceRequest {
            name: name.to_string(),
        };
        self.http_client.post("/audiences", &request).await
    }

    pub async fn get_audience(&self, audience_id: &str) -> Result<Audience> {
        self.http_client
            .get(&format!("/audiences/{}", segment(audience_id)))
            .await
    }

    pub async fn list_audiences(&self) -> Result<ListResponse<Audience>> {
        self.http_client.get("/audiences").await
    }

    pub async fn delete_audience(&self, audience_id: &str) -> Result<DeleteResponse> {
        self.http_client
            .delete(&format!("/audiences/{}", segment(audience_id)))
            .await
    }

    // ------------------------------------------------------------------
    // Domains
    // ------------------------------------------------------------------

    /// Get a domain's verification status
    pub async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        self.http_client
            .get(&format!("/domains/{}", segment(domain_id)))
            .await
    }

    pub async fn list_domains(&self) -> Result<ListResponse<Domain>> {
        self.http_client.get("/domains").await
    }
}

fn contacts_path(audience_id: &str) -> String {
    format!("/audiences/{}/contacts", segment(audience_id))
}

fn contact_path(audience_id: &str, contact_id: &str) -> String {
    format!(
        "/audiences/{}/contacts/{}",
        segment(audience_id),
        segment(contact_id)
    )
}

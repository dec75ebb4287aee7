//! API Module
//!
//! Request and response payloads for the Resend REST API.

pub mod audience;
pub mod common;
pub mod contact;
pub mod domain;
pub mod email;

pub use audience::{Audience, CreateAudienceRequest};
pub use common::{DeleteResponse, ListResponse, Recipients};
pub use contact::{Contact, CreateContactRequest, UpdateContactRequest};
pub use domain::Domain;
pub use email::{Email, SendEmailRequest, SendEmailResponse};

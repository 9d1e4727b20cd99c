//! Rebill API client SDK.
//!
//! This crate provides a fluent client for the hosted Rebill billing
//! API. Resource chains compile into plain `{url, method, body}`
//! requests via [`rebill-core`](rebill_core); this crate adds the HTTP
//! transport, basic-auth credentials, response decoding, and the
//! status-to-error mapping.
//!
//! # Example
//!
//! ```no_run
//! use rebill_client::{CallArgs, RebillClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), rebill_client::ClientError> {
//! let client = RebillClient::new("your-api-key", "acme");
//!
//! // Create a customer.
//! let created = client
//!     .customers()
//!     .create()
//!     .send(CallArgs::new().data(json!({
//!         "customer": {
//!             "first_name": "Joe",
//!             "last_name": "Blow",
//!             "email": "joe@example.com"
//!         }
//!     })))
//!     .await?;
//!
//! // Report component usage under a subscription.
//! let usage = client
//!     .subscriptions()
//!     .components()
//!     .usages()
//!     .create()
//!     .send(
//!         CallArgs::new()
//!             .subscription_id(123)
//!             .component_id(456)
//!             .data(json!({"usage": {"quantity": 5, "memo": "My memo"}})),
//!     )
//!     .await?;
//!
//! println!("created: {created}, usage: {usage}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod transport;

pub use client::{Chain, ClientOptions, RebillClient};
pub use error::ClientError;
pub use transport::{decode_body, Credentials, HttpTransport, RawResponse, Transport};

pub use rebill_core::{
    CallArgs, CompileError, CompiledRequest, IdentifierBindings, Method, PathBuilder,
    RequestCompiler,
};

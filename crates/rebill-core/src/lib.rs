//! Request-construction engine for the Rebill API client.
//!
//! This crate turns fluent resource chains into REST request
//! descriptors for the hosted billing API. A [`PathBuilder`]
//! accumulates path segments immutably; its terminal
//! [`invoke`](PathBuilder::invoke) hands the segments and a
//! [`CallArgs`] bag to the [`RequestCompiler`], which extracts the
//! trailing verb, splices identifier values into the path, serializes
//! the body or query string, and assembles the final URL. No I/O
//! happens here; executing a [`CompiledRequest`] is the transport's
//! job.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rebill_core::{CallArgs, Method, RequestCompiler};
//!
//! # fn main() -> Result<(), rebill_core::CompileError> {
//! let compiler = Arc::new(RequestCompiler::new("acme"));
//! let request = compiler
//!     .root()
//!     .subscriptions()
//!     .components()
//!     .usages()
//!     .invoke(CallArgs::new().subscription_id(123).component_id(456))?;
//!
//! assert_eq!(
//!     request.url,
//!     "https://acme.rebill.com/subscriptions/123/components/456/usages.json"
//! );
//! assert_eq!(request.method, Method::Get);
//! assert!(request.body.is_none());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod args;
mod bindings;
mod compile;
mod error;
mod path;

pub use args::CallArgs;
pub use bindings::{verb_method, IdentifierBindings, Method};
pub use compile::{CompiledRequest, RequestCompiler, DEFAULT_APEX_DOMAIN};
pub use error::{CompileError, Result};
pub use path::PathBuilder;

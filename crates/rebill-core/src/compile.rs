//! Request compilation.
//!
//! Turns an accumulated segment list plus call arguments into the
//! final `{url, method, body}` triple. Compilation is pure and
//! deterministic; every failure surfaces here, before any I/O.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use url::form_urlencoded;

use crate::args::{plain_string, CallArgs};
use crate::bindings::{verb_method, IdentifierBindings, Method};
use crate::error::CompileError;
use crate::path::PathBuilder;

/// Apex domain of the hosted API.
pub const DEFAULT_APEX_DOMAIN: &str = "rebill.com";

/// A compiled request, ready for a transport to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRequest {
    /// Fully-assembled request URL, query string included.
    pub url: String,
    /// HTTP method derived from the trailing verb segment.
    pub method: Method,
    /// JSON body, present only when `data` was supplied.
    pub body: Option<String>,
}

/// Compiles resource paths into requests against one API site.
#[derive(Debug)]
pub struct RequestCompiler {
    base_url: String,
    identifiers: IdentifierBindings,
}

impl RequestCompiler {
    /// Compiler for the hosted site at `https://{subdomain}.rebill.com/`.
    #[must_use]
    pub fn new(subdomain: &str) -> Self {
        Self::with_base_url(format!("https://{subdomain}.{DEFAULT_APEX_DOMAIN}"))
    }

    /// Compiler for an explicit base URL (self-hosted deployments and
    /// test servers).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identifiers: IdentifierBindings::standard(),
        }
    }

    /// Replace the identifier table.
    #[must_use]
    pub fn with_identifiers(mut self, identifiers: IdentifierBindings) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Root path builder bound to this compiler.
    #[must_use]
    pub fn root(self: Arc<Self>) -> PathBuilder {
        PathBuilder::new(self)
    }

    /// Compile `path` and `args` into a request.
    ///
    /// The caller's path is copied, never mutated.
    ///
    /// # Errors
    ///
    /// Fails with [`CompileError::EmptyPath`] on an empty path (before
    /// or after verb extraction), [`CompileError::InvalidPath`] when a
    /// supplied identifier has no anchor segment in the path, and
    /// [`CompileError::Serialization`] when the body cannot be encoded.
    pub fn compile(
        &self,
        path: &[String],
        mut args: CallArgs,
    ) -> Result<CompiledRequest, CompileError> {
        if path.is_empty() {
            return Err(CompileError::EmptyPath);
        }
        let mut segments: Vec<String> = path.to_vec();

        // A trailing verb selects the method; everything else is GET.
        let method = match segments.last().map(String::as_str).and_then(verb_method) {
            Some(method) => {
                segments.pop();
                method
            }
            None => Method::Get,
        };
        if segments.is_empty() {
            return Err(CompileError::EmptyPath);
        }

        // Splice identifier values in after their anchor segments, in
        // table order. Null and empty-string values count as absent.
        for (identifier, anchor) in self.identifiers.iter() {
            let Some(value) = args.take(identifier) else {
                continue;
            };
            if is_absent(&value) {
                continue;
            }
            let position = segments.iter().position(|segment| segment == anchor).ok_or_else(
                || CompileError::InvalidPath {
                    identifier: identifier.to_string(),
                    anchor: anchor.to_string(),
                },
            )?;
            segments.insert(position + 1, plain_string(&value));
        }

        let body = match args.take_data() {
            Some(data) => Some(serde_json::to_string(&data?)?),
            None => None,
        };

        // GET carries leftover arguments in the query string, leftover
        // winning over an explicit query parameter of the same name.
        // Other methods drop them.
        let mut params = args.take_get_params();
        let entries = args.into_entries();
        let query = if method.is_get() && !(entries.is_empty() && params.is_empty()) {
            params.extend(entries);
            Some(encode_query(&params))
        } else {
            if !entries.is_empty() {
                tracing::debug!(
                    method = %method,
                    ignored = ?entries.keys().collect::<Vec<_>>(),
                    "dropping extra arguments on non-GET request"
                );
            }
            None
        };

        let mut resource = format!("{}.json", segments.join("/"));
        if let Some(query) = &query {
            resource.push('?');
            resource.push_str(query);
        }

        // Billing-portal quirk: management-link URLs live under
        // /portal/customers and carry no .json suffix.
        if segments.iter().any(|segment| segment == "management_link") {
            resource = resource.replacen("customers", "portal/customers", 1);
            resource = resource.replacen(".json", "", 1);
        }

        Ok(CompiledRequest {
            url: format!("{}/{resource}", self.base_url),
            method,
            body,
        })
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn encode_query(params: &BTreeMap<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        match value {
            // Multi-valued parameters encode as repeated keys.
            Value::Array(items) => {
                for item in items {
                    serializer.append_pair(key, &plain_string(item));
                }
            }
            Value::Null => {}
            other => {
                serializer.append_pair(key, &plain_string(other));
            }
        }
    }
    serializer.finish()
}

//! Verb and identifier binding tables.
//!
//! Two fixed vocabularies drive request compilation: trailing verb
//! segments that select the HTTP method, and identifier keys whose
//! values are spliced into the path after a named anchor segment.
//! Both are read-only after construction and safe to share across
//! threads without synchronization.

use std::fmt;

use crate::error::CompileError;

/// HTTP method selected by a trailing verb segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl Method {
    /// Return the method as an uppercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether this method carries its arguments in the query string.
    #[must_use]
    pub const fn is_get(self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a trailing path segment to an HTTP method, if it is a verb.
///
/// Paths without a recognized trailing verb compile to GET.
#[must_use]
pub fn verb_method(segment: &str) -> Option<Method> {
    match segment {
        "create" => Some(Method::Post),
        "read" => Some(Method::Get),
        "update" => Some(Method::Put),
        "delete" => Some(Method::Delete),
        _ => None,
    }
}

/// Identifier vocabulary of the hosted API.
const STANDARD_IDENTIFIERS: &[(&str, &str)] = &[
    ("customer_id", "customers"),
    ("product_id", "products"),
    ("subscription_id", "subscriptions"),
    ("component_id", "components"),
    ("handle", "handle"),
    ("statement_id", "statements"),
    ("product_family_id", "product_families"),
    ("coupon_id", "coupons"),
    ("transaction_id", "transactions"),
    ("usage_id", "usages"),
    ("migration_id", "migrations"),
];

/// Identifier-to-anchor bindings.
///
/// Each entry maps an identifier key (`customer_id`) to the path
/// segment its value is inserted after (`customers`). Keys and anchors
/// must both be unique: one identifier per anchor, one anchor per
/// identifier. Ambiguous tables are rejected at construction rather
/// than letting one binding silently shadow another.
#[derive(Debug, Clone)]
pub struct IdentifierBindings {
    entries: Vec<(String, String)>,
}

impl IdentifierBindings {
    /// Build a binding table, validating it for ambiguity.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Configuration`] if two entries share an
    /// identifier key or an anchor segment.
    pub fn new<I, K, A>(entries: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Into<String>,
    {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(key, anchor)| (key.into(), anchor.into()))
            .collect();

        for (index, (key, anchor)) in entries.iter().enumerate() {
            for (earlier_key, earlier_anchor) in &entries[..index] {
                if key == earlier_key {
                    return Err(CompileError::Configuration(format!(
                        "identifier `{key}` is bound more than once"
                    )));
                }
                if anchor == earlier_anchor {
                    return Err(CompileError::Configuration(format!(
                        "anchor segment `{anchor}` is bound by both `{earlier_key}` and `{key}`"
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    /// The standard binding table for the hosted API.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_IDENTIFIERS
                .iter()
                .map(|&(key, anchor)| (key.to_string(), anchor.to_string()))
                .collect(),
        }
    }

    /// Iterate over `(identifier, anchor)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, anchor)| (key.as_str(), anchor.as_str()))
    }

    /// Number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

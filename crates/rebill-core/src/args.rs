//! Call arguments for a terminal builder invocation.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

/// Arguments supplied when a request chain is invoked.
///
/// A `CallArgs` bag holds identifier values, an optional JSON body, an
/// explicit query-parameter map, and any extra named arguments. Extra
/// arguments on a GET request become query parameters; on other
/// methods they are dropped.
#[derive(Debug, Default)]
pub struct CallArgs {
    entries: BTreeMap<String, Value>,
    data: Option<serde_json::Result<Value>>,
    get_params: BTreeMap<String, Value>,
}

impl CallArgs {
    /// An empty argument bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named argument.
    ///
    /// Identifier keys (`customer_id`, `subscription_id`, ...) are
    /// spliced into the path; anything else rides along as a query
    /// parameter on GET requests.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Set the JSON request body.
    ///
    /// Serialization is checked when the request is compiled; a value
    /// that cannot be represented as JSON fails compilation with
    /// [`CompileError::Serialization`](crate::CompileError::Serialization)
    /// before anything is sent.
    #[must_use]
    pub fn data<T: Serialize>(mut self, value: T) -> Self {
        self.data = Some(serde_json::to_value(value));
        self
    }

    /// Set an explicit query parameter.
    ///
    /// Extra named arguments win over explicit query parameters when
    /// the same key is set both ways.
    #[must_use]
    pub fn get_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.get_params.insert(key.into(), value.into());
        self
    }

    /// Bind the customer identifier.
    #[must_use]
    pub fn customer_id(self, value: impl Display) -> Self {
        self.identifier("customer_id", &value)
    }

    /// Bind the product identifier.
    #[must_use]
    pub fn product_id(self, value: impl Display) -> Self {
        self.identifier("product_id", &value)
    }

    /// Bind the subscription identifier.
    #[must_use]
    pub fn subscription_id(self, value: impl Display) -> Self {
        self.identifier("subscription_id", &value)
    }

    /// Bind the component identifier.
    #[must_use]
    pub fn component_id(self, value: impl Display) -> Self {
        self.identifier("component_id", &value)
    }

    /// Bind an API handle.
    #[must_use]
    pub fn handle(self, value: impl Display) -> Self {
        self.identifier("handle", &value)
    }

    /// Bind the statement identifier.
    #[must_use]
    pub fn statement_id(self, value: impl Display) -> Self {
        self.identifier("statement_id", &value)
    }

    /// Bind the product-family identifier.
    #[must_use]
    pub fn product_family_id(self, value: impl Display) -> Self {
        self.identifier("product_family_id", &value)
    }

    /// Bind the coupon identifier.
    #[must_use]
    pub fn coupon_id(self, value: impl Display) -> Self {
        self.identifier("coupon_id", &value)
    }

    /// Bind the transaction identifier.
    #[must_use]
    pub fn transaction_id(self, value: impl Display) -> Self {
        self.identifier("transaction_id", &value)
    }

    /// Bind the usage identifier.
    #[must_use]
    pub fn usage_id(self, value: impl Display) -> Self {
        self.identifier("usage_id", &value)
    }

    /// Bind the migration identifier.
    #[must_use]
    pub fn migration_id(self, value: impl Display) -> Self {
        self.identifier("migration_id", &value)
    }

    fn identifier(self, key: &str, value: &dyn Display) -> Self {
        self.arg(key, value.to_string())
    }

    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub(crate) fn take_data(&mut self) -> Option<serde_json::Result<Value>> {
        self.data.take()
    }

    pub(crate) fn take_get_params(&mut self) -> BTreeMap<String, Value> {
        std::mem::take(&mut self.get_params)
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

/// Render a JSON value the way it should appear inside a URL.
///
/// Strings render bare (no quotes); scalars render with their JSON
/// text; anything structured falls back to compact JSON.
pub(crate) fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_setters_stringify() {
        let mut args = CallArgs::new().customer_id(123).handle("gold-plan");
        assert_eq!(args.take("customer_id"), Some(json!("123")));
        assert_eq!(args.take("handle"), Some(json!("gold-plan")));
    }

    #[test]
    fn data_serialization_is_deferred() {
        let mut args = CallArgs::new().data(json!({"customer": {"first_name": "Joe"}}));
        let data = args.take_data().expect("data was set");
        assert_eq!(data.expect("json literal serializes"), json!({"customer": {"first_name": "Joe"}}));
    }

    #[test]
    fn plain_strings_are_unquoted() {
        assert_eq!(plain_string(&json!("abc")), "abc");
        assert_eq!(plain_string(&json!(42)), "42");
        assert_eq!(plain_string(&json!(true)), "true");
    }
}

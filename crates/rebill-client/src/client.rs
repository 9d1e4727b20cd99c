//! Rebill API client and fluent request chain.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use rebill_core::{CallArgs, CompileError, CompiledRequest, PathBuilder, RequestCompiler};

use crate::error::{check_status, ClientError};
use crate::transport::{decode_body, Credentials, HttpTransport, RawResponse, Transport};

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Base URL override for self-hosted deployments and tests.
    ///
    /// `None` targets the hosted site at
    /// `https://{subdomain}.rebill.com`.
    pub base_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            base_url: None,
        }
    }
}

impl ClientOptions {
    /// Options pointing at an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }
}

/// A client for the Rebill API.
///
/// Cloning is cheap; clones share the compiler and the underlying
/// transport.
#[derive(Clone)]
pub struct RebillClient {
    compiler: Arc<RequestCompiler>,
    transport: Arc<dyn Transport>,
    credentials: Credentials,
}

impl fmt::Debug for RebillClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RebillClient")
            .field("compiler", &self.compiler)
            .finish_non_exhaustive()
    }
}

impl RebillClient {
    /// Client for the hosted site at `https://{subdomain}.rebill.com`.
    #[must_use]
    pub fn new(api_key: impl Into<String>, subdomain: &str) -> Self {
        Self::with_options(api_key, subdomain, ClientOptions::default())
    }

    /// Client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen
    /// with default settings).
    #[must_use]
    pub fn with_options(
        api_key: impl Into<String>,
        subdomain: &str,
        options: ClientOptions,
    ) -> Self {
        let compiler = match options.base_url {
            Some(base_url) => RequestCompiler::with_base_url(base_url),
            None => RequestCompiler::new(subdomain),
        };
        let transport = HttpTransport::new(Duration::from_secs(options.timeout_seconds));
        Self::assemble(compiler, Arc::new(transport), api_key)
    }

    /// Client with an injected transport.
    ///
    /// Used by tests to substitute a recording double, and by callers
    /// who bring their own HTTP stack.
    #[must_use]
    pub fn with_transport(
        api_key: impl Into<String>,
        subdomain: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::assemble(RequestCompiler::new(subdomain), transport, api_key)
    }

    fn assemble(
        compiler: RequestCompiler,
        transport: Arc<dyn Transport>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            compiler: Arc::new(compiler),
            transport,
            credentials: Credentials::new(api_key),
        }
    }

    /// Execute a compiled request and decode the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the request never
    /// reached the server, and a status error carrying the decoded
    /// body when the API answered 401, 403, 404, 422, or 500.
    pub async fn execute(&self, request: &CompiledRequest) -> Result<Value, ClientError> {
        tracing::debug!(method = %request.method, url = %request.url, "executing request");
        let RawResponse { status, body } =
            self.transport.execute(request, &self.credentials).await?;
        check_status(status, decode_body(&body))
    }

    /// Start a chain at an arbitrary resource.
    #[must_use]
    pub fn resource(&self, name: impl Into<String>) -> Chain {
        Chain {
            client: self.clone(),
            builder: Arc::clone(&self.compiler).root().segment(name),
        }
    }

    /// The `customers` collection.
    #[must_use]
    pub fn customers(&self) -> Chain {
        self.resource("customers")
    }

    /// The `products` collection.
    #[must_use]
    pub fn products(&self) -> Chain {
        self.resource("products")
    }

    /// The `subscriptions` collection.
    #[must_use]
    pub fn subscriptions(&self) -> Chain {
        self.resource("subscriptions")
    }

    /// The `statements` collection.
    #[must_use]
    pub fn statements(&self) -> Chain {
        self.resource("statements")
    }

    /// The `product_families` collection.
    #[must_use]
    pub fn product_families(&self) -> Chain {
        self.resource("product_families")
    }

    /// The `coupons` collection.
    #[must_use]
    pub fn coupons(&self) -> Chain {
        self.resource("coupons")
    }

    /// The `transactions` collection.
    #[must_use]
    pub fn transactions(&self) -> Chain {
        self.resource("transactions")
    }
}

/// A fluent request chain bound to a client.
///
/// Chains extend immutably, like the underlying path builder; keeping
/// a prefix around and branching it is safe.
#[derive(Debug, Clone)]
pub struct Chain {
    client: RebillClient,
    builder: PathBuilder,
}

impl Chain {
    fn map(self, extend: impl FnOnce(&PathBuilder) -> PathBuilder) -> Self {
        Self {
            builder: extend(&self.builder),
            client: self.client,
        }
    }

    /// Append an arbitrary path segment.
    #[must_use]
    pub fn segment(self, name: impl Into<String>) -> Self {
        let builder = self.builder.segment(name);
        Self {
            builder,
            client: self.client,
        }
    }

    /// The `customers` collection.
    #[must_use]
    pub fn customers(self) -> Self {
        self.map(PathBuilder::customers)
    }

    /// The `products` collection.
    #[must_use]
    pub fn products(self) -> Self {
        self.map(PathBuilder::products)
    }

    /// The `subscriptions` collection.
    #[must_use]
    pub fn subscriptions(self) -> Self {
        self.map(PathBuilder::subscriptions)
    }

    /// The `components` collection under a subscription.
    #[must_use]
    pub fn components(self) -> Self {
        self.map(PathBuilder::components)
    }

    /// The `usages` collection under a component.
    #[must_use]
    pub fn usages(self) -> Self {
        self.map(PathBuilder::usages)
    }

    /// The `statements` collection.
    #[must_use]
    pub fn statements(self) -> Self {
        self.map(PathBuilder::statements)
    }

    /// The `product_families` collection.
    #[must_use]
    pub fn product_families(self) -> Self {
        self.map(PathBuilder::product_families)
    }

    /// The `coupons` collection.
    #[must_use]
    pub fn coupons(self) -> Self {
        self.map(PathBuilder::coupons)
    }

    /// The `transactions` collection.
    #[must_use]
    pub fn transactions(self) -> Self {
        self.map(PathBuilder::transactions)
    }

    /// The `migrations` collection under a subscription.
    #[must_use]
    pub fn migrations(self) -> Self {
        self.map(PathBuilder::migrations)
    }

    /// The `charges` collection under a subscription.
    #[must_use]
    pub fn charges(self) -> Self {
        self.map(PathBuilder::charges)
    }

    /// The billing-portal `management_link` endpoint.
    #[must_use]
    pub fn management_link(self) -> Self {
        self.map(PathBuilder::management_link)
    }

    /// The `lookup` endpoint for reference-based reads.
    #[must_use]
    pub fn lookup(self) -> Self {
        self.map(PathBuilder::lookup)
    }

    /// The `handle` segment for handle-based reads.
    #[must_use]
    pub fn handle(self) -> Self {
        self.map(PathBuilder::handle)
    }

    /// The `reactivate` action on a subscription.
    #[must_use]
    pub fn reactivate(self) -> Self {
        self.map(PathBuilder::reactivate)
    }

    /// Trailing verb: compile to POST.
    #[must_use]
    pub fn create(self) -> Self {
        self.map(PathBuilder::create)
    }

    /// Trailing verb: compile to GET.
    #[must_use]
    pub fn read(self) -> Self {
        self.map(PathBuilder::read)
    }

    /// Trailing verb: compile to PUT.
    #[must_use]
    pub fn update(self) -> Self {
        self.map(PathBuilder::update)
    }

    /// Trailing verb: compile to DELETE.
    #[must_use]
    pub fn delete(self) -> Self {
        self.map(PathBuilder::delete)
    }

    /// Compile the chain without sending it.
    ///
    /// # Errors
    ///
    /// Fails with the same [`CompileError`] cases as
    /// [`PathBuilder::invoke`].
    pub fn request(&self, args: CallArgs) -> Result<CompiledRequest, CompileError> {
        self.builder.invoke(args)
    }

    /// Compile the chain and execute it.
    ///
    /// # Errors
    ///
    /// Compilation failures surface before any I/O; transport and
    /// status failures surface as [`ClientError`] values.
    pub async fn send(&self, args: CallArgs) -> Result<Value, ClientError> {
        let request = self.builder.invoke(args)?;
        self.client.execute(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rebill_core::Method;
    use serde_json::json;

    /// Transport double that records and returns its inputs.
    #[derive(Default)]
    struct RecordingTransport {
        seen: Mutex<Vec<(CompiledRequest, String)>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(
            &self,
            request: &CompiledRequest,
            credentials: &Credentials,
        ) -> Result<RawResponse, ClientError> {
            self.seen
                .lock()
                .expect("recording lock")
                .push((request.clone(), credentials.api_key().to_string()));
            let echo = json!({
                "url": request.url,
                "method": request.method.as_str(),
                "body": request.body,
            });
            Ok(RawResponse {
                status: 200,
                body: serde_json::to_vec(&echo).expect("echo serializes"),
            })
        }
    }

    fn recording_client() -> (RebillClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let client = RebillClient::with_transport(
            "api-key",
            "acme",
            Arc::clone(&transport) as Arc<dyn Transport>,
        );
        (client, transport)
    }

    #[tokio::test]
    async fn chain_compiles_and_hands_off_to_the_transport() {
        let (client, transport) = recording_client();

        let response = client
            .customers()
            .create()
            .send(CallArgs::new().data(json!({"customer": {"first_name": "Joe"}})))
            .await
            .expect("send should succeed");

        assert_eq!(response["method"], "POST");
        assert_eq!(response["url"], "https://acme.rebill.com/customers.json");

        let seen = transport.seen.lock().expect("recording lock");
        let (request, api_key) = &seen[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"customer":{"first_name":"Joe"}}"#)
        );
        assert_eq!(api_key, "api-key");
    }

    #[test]
    fn chains_branch_without_interfering() {
        let (client, _transport) = recording_client();

        let subscriptions = client.subscriptions();
        let usages = subscriptions.clone().components().usages();

        let listing = subscriptions
            .request(CallArgs::new().subscription_id(123))
            .expect("listing compiles");
        assert_eq!(listing.url, "https://acme.rebill.com/subscriptions/123.json");

        let nested = usages
            .request(CallArgs::new().subscription_id(123).component_id(456))
            .expect("nested chain compiles");
        assert_eq!(
            nested.url,
            "https://acme.rebill.com/subscriptions/123/components/456/usages.json"
        );
    }

    #[tokio::test]
    async fn compile_errors_surface_before_any_io() {
        let (client, transport) = recording_client();

        let result = client.resource("create").send(CallArgs::new()).await;
        assert!(matches!(
            result,
            Err(ClientError::Compile(CompileError::EmptyPath))
        ));
        assert!(transport.seen.lock().expect("recording lock").is_empty());
    }

    #[tokio::test]
    async fn misplaced_identifier_never_reaches_the_transport() {
        let (client, transport) = recording_client();

        let result = client
            .products()
            .send(CallArgs::new().customer_id(123))
            .await;
        assert!(matches!(
            result,
            Err(ClientError::Compile(CompileError::InvalidPath { .. }))
        ));
        assert!(transport.seen.lock().expect("recording lock").is_empty());
    }

    #[test]
    fn options_default_to_the_hosted_site() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout_seconds, 30);
        assert!(options.base_url.is_none());
    }

    #[test]
    fn options_accept_a_base_url_override() {
        let options = ClientOptions::with_base_url("http://127.0.0.1:9000");
        assert_eq!(options.base_url.as_deref(), Some("http://127.0.0.1:9000"));
    }
}

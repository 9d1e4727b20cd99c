//! Resource-path accumulation.

use std::sync::Arc;

use crate::args::CallArgs;
use crate::compile::{CompiledRequest, RequestCompiler};
use crate::error::CompileError;

/// A resource path under construction.
///
/// Every extension returns a new builder and never mutates the
/// receiver, so chains built from a shared root cannot interfere with
/// each other. A builder is finished off with [`invoke`](Self::invoke),
/// which compiles the accumulated segments into a request.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    compiler: Arc<RequestCompiler>,
    segments: Vec<String>,
}

impl PathBuilder {
    pub(crate) fn new(compiler: Arc<RequestCompiler>) -> Self {
        Self {
            compiler,
            segments: Vec::new(),
        }
    }

    /// Append an arbitrary path segment.
    ///
    /// Segment content is not validated; a typo surfaces as a 404 at
    /// request time. The named methods below cover the known resource
    /// vocabulary.
    #[must_use]
    pub fn segment(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self {
            compiler: Arc::clone(&self.compiler),
            segments,
        }
    }

    /// The accumulated segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Compile the accumulated path and arguments into a request.
    ///
    /// # Errors
    ///
    /// Fails with [`CompileError::EmptyPath`] when no segments have
    /// been accumulated, [`CompileError::InvalidPath`] when a supplied
    /// identifier has no anchor segment in the path, and
    /// [`CompileError::Serialization`] when the body cannot be encoded.
    pub fn invoke(&self, args: CallArgs) -> Result<CompiledRequest, CompileError> {
        self.compiler.compile(&self.segments, args)
    }

    /// The `customers` collection.
    #[must_use]
    pub fn customers(&self) -> Self {
        self.segment("customers")
    }

    /// The `products` collection.
    #[must_use]
    pub fn products(&self) -> Self {
        self.segment("products")
    }

    /// The `subscriptions` collection.
    #[must_use]
    pub fn subscriptions(&self) -> Self {
        self.segment("subscriptions")
    }

    /// The `components` collection under a subscription.
    #[must_use]
    pub fn components(&self) -> Self {
        self.segment("components")
    }

    /// The `usages` collection under a component.
    #[must_use]
    pub fn usages(&self) -> Self {
        self.segment("usages")
    }

    /// The `statements` collection.
    #[must_use]
    pub fn statements(&self) -> Self {
        self.segment("statements")
    }

    /// The `product_families` collection.
    #[must_use]
    pub fn product_families(&self) -> Self {
        self.segment("product_families")
    }

    /// The `coupons` collection.
    #[must_use]
    pub fn coupons(&self) -> Self {
        self.segment("coupons")
    }

    /// The `transactions` collection.
    #[must_use]
    pub fn transactions(&self) -> Self {
        self.segment("transactions")
    }

    /// The `migrations` collection under a subscription.
    #[must_use]
    pub fn migrations(&self) -> Self {
        self.segment("migrations")
    }

    /// The `charges` collection under a subscription.
    #[must_use]
    pub fn charges(&self) -> Self {
        self.segment("charges")
    }

    /// The billing-portal `management_link` endpoint.
    #[must_use]
    pub fn management_link(&self) -> Self {
        self.segment("management_link")
    }

    /// The `lookup` endpoint for reference-based reads.
    #[must_use]
    pub fn lookup(&self) -> Self {
        self.segment("lookup")
    }

    /// The `handle` segment for handle-based reads.
    #[must_use]
    pub fn handle(&self) -> Self {
        self.segment("handle")
    }

    /// The `reactivate` action on a subscription.
    #[must_use]
    pub fn reactivate(&self) -> Self {
        self.segment("reactivate")
    }

    /// Trailing verb: compile to POST.
    #[must_use]
    pub fn create(&self) -> Self {
        self.segment("create")
    }

    /// Trailing verb: compile to GET.
    #[must_use]
    pub fn read(&self) -> Self {
        self.segment("read")
    }

    /// Trailing verb: compile to PUT.
    #[must_use]
    pub fn update(&self) -> Self {
        self.segment("update")
    }

    /// Trailing verb: compile to DELETE.
    #[must_use]
    pub fn delete(&self) -> Self {
        self.segment("delete")
    }
}

//! Client error types.

use serde_json::Value;

use rebill_core::CompileError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the billing API.
///
/// Compilation failures surface before anything is sent; transport and
/// status failures surface as the result of the single network call,
/// with no automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never reached the server (DNS, refused connection,
    /// timeout).
    #[error("connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The API rejected the credentials (401).
    #[error("unauthorized (401)")]
    Unauthorized {
        /// Decoded response body.
        body: Value,
    },

    /// The credentials lack access to this resource (403).
    #[error("forbidden (403)")]
    Forbidden {
        /// Decoded response body.
        body: Value,
    },

    /// The resource does not exist (404).
    #[error("not found (404)")]
    NotFound {
        /// Decoded response body.
        body: Value,
    },

    /// The server rejected the submitted entity (422).
    #[error("unprocessable entity (422)")]
    UnprocessableEntity {
        /// Decoded response body.
        body: Value,
    },

    /// The server failed to process the request (500).
    #[error("server error (500)")]
    Server {
        /// Decoded response body.
        body: Value,
    },

    /// The request could not be compiled; nothing was sent.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl ClientError {
    /// Decoded response body, for errors that carry one.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Unauthorized { body }
            | Self::Forbidden { body }
            | Self::NotFound { body }
            | Self::UnprocessableEntity { body }
            | Self::Server { body } => Some(body),
            Self::Connection(_) | Self::Compile(_) => None,
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::UnprocessableEntity { .. } => Some(422),
            Self::Server { .. } => Some(500),
            Self::Connection(_) | Self::Compile(_) => None,
        }
    }
}

/// Map a response status to the caller's result.
///
/// The mapped statuses become typed errors carrying the decoded body;
/// everything else, 201 and the other success codes included, passes
/// the body through unchanged.
pub(crate) fn check_status(status: u16, body: Value) -> Result<Value> {
    match status {
        401 => Err(ClientError::Unauthorized { body }),
        403 => Err(ClientError::Forbidden { body }),
        404 => Err(ClientError::NotFound { body }),
        422 => Err(ClientError::UnprocessableEntity { body }),
        500 => Err(ClientError::Server { body }),
        _ => Ok(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapped_statuses_become_typed_errors() {
        let body = json!({"errors": ["Invalid email"]});
        let error = check_status(422, body.clone()).expect_err("422 is an error");
        assert!(matches!(error, ClientError::UnprocessableEntity { .. }));
        assert_eq!(error.status(), Some(422));
        assert_eq!(error.body(), Some(&body));
    }

    #[test]
    fn success_statuses_pass_the_body_through() {
        let body = json!({"customer": {"id": 1}});
        assert_eq!(check_status(200, body.clone()).expect("200 is success"), body);
        assert_eq!(check_status(201, body.clone()).expect("201 is success"), body);
    }

    #[test]
    fn unmapped_statuses_are_not_errors() {
        let body = json!({});
        assert!(check_status(204, body.clone()).is_ok());
        assert!(check_status(302, body).is_ok());
    }
}

// Shared plumbing for talking to the REST backend.
//
// Purpose
// - Classify every failure of a remote call into one of four kinds so that services can
//   turn it into a user-facing message without knowing about HTTP.
//
// Boundaries
// - No resource specific paths here. Outbound adapters own their routes.

pub mod client;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be built or sent; nothing reached the network.
    #[error("request could not be sent: {0}")]
    Client(String),

    /// No connection, connection reset or timeout. A browser reports these as status 0.
    #[error("unable to reach the server: {0}")]
    Network(String),

    /// A response arrived but its body is not what the endpoint promises.
    #[error("malformed response: {0}")]
    Parse(String),

    /// The server answered with a non-success status.
    #[error("server responded with {status} {status_text}")]
    Server {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl ApiError {
    pub fn server(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        ApiError::server(404, "Not Found", "")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

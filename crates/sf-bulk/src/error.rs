//! Error types for sfutils-bulk.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The underlying client error, if this error came from the HTTP layer.
    pub fn client_error(&self) -> Option<&sfutils_client::Error> {
        self.source.as_deref()?.downcast_ref::<sfutils_client::Error>()
    }

    /// HTTP status of an unexpected response.
    pub fn status(&self) -> Option<u16> {
        self.client_error()?.status()
    }

    /// Raw body of an unexpected response.
    pub fn body(&self) -> Option<&str> {
        self.client_error()?.body()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_unauthorized())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
}

impl From<sfutils_client::Error> for Error {
    fn from(err: sfutils_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

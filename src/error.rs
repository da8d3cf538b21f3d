use std::fmt::{Display, Formatter};

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the listmonk API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provider configuration is unusable (bad host, invalid header).
    #[error("invalid provider configuration: {0}")]
    Config(String),

    /// The request could not be sent or the response body could not be read.
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request body could not be serialized.
    #[error("error encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The API answered with anything other than 200 OK.
    #[error("error: {status}\n{body}")]
    Remote { status: StatusCode, body: String },

    /// A 200 OK whose body does not match the expected envelope.
    #[error("error unmarshalling response body: {source}\n{body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A template identifier that is not a positive base-10 integer.
    #[error("unable to parse template ID {value:?}: {reason}")]
    Identifier { value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Remote,
    Decode,
    Identifier,
}

impl Error {
    pub fn identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Identifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Transport(_) | Error::Encode(_) => ErrorKind::Transport,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Identifier { .. } => ErrorKind::Identifier,
        }
    }

    /// Status of a remote failure, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Remote => write!(f, "remote"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Identifier => write!(f, "identifier"),
        }
    }
}

/// Lifecycle operations the orchestrator can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
    DataSourceRead,
}

impl Operation {
    pub fn summary(&self) -> &'static str {
        match self {
            Operation::Create => "Failed to create template",
            Operation::Read => "Failed to read template",
            Operation::Update => "Failed to update template",
            Operation::Delete => "Could not delete template",
            Operation::List => "Failed to list templates",
            Operation::DataSourceRead => "Unable to read template",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::List => write!(f, "list"),
            Operation::DataSourceRead => write!(f, "data_source_read"),
        }
    }
}

/// A failed lifecycle operation, labelled with what was attempted.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .operation.summary())]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: Error,
}

impl OperationError {
    pub fn new(operation: Operation, source: Error) -> Self {
        Self { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

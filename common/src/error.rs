use thiserror::Error;

/// Errors produced while expanding user supplied host/port specifications.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("empty port specification")]
    EmptyPortSpec,

    #[error("invalid port number '{0}'")]
    InvalidPort(String),

    #[error("invalid port range '{0}'")]
    InvalidPortRange(String),
}

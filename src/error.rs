use thiserror::Error;

/// Failures a user can cause from the command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KataError {
    #[error("kata {name} not found")]
    NotFound { name: String },
    #[error("kata {name} already marked as done today")]
    AlreadyDoneToday { name: String },
    #[error("kata {name} is already tracked")]
    AlreadyTracked { name: String },
    #[error("katas already initialized; use --force to add missing defaults")]
    AlreadyInitialized,
    #[error("kata name must not be empty")]
    EmptyName,
}

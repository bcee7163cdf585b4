use thiserror::Error;

/// Custom error type for user-related operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with given email already exists.")]
    EmailTaken,
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("User not found: {0}")]
    NotFound(String),
}

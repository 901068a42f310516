pub mod models;
pub mod seat;
pub mod repository;
pub mod memory;

pub use seat::{SeatAllocator, SeatClass, SeatCode, SeatScope};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFoundError(String),
    #[error("Repository unavailable: {0}")]
    RepositoryError(String),
    #[error("Invalid seat class: {0}")]
    InvalidSeatClass(String),
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

//! Error types for booking-engine operations.
//!
//! Validation failures and data-source failures are deliberately separate
//! variants: callers must never present a source outage as "no conflict" or
//! "fully booked".

use thiserror::Error;

/// Boxed error produced by a [`crate::source::BookingSource`] implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Booking source error: {0}")]
    Source(#[source] SourceError),
}

impl EngineError {
    /// True for caller-bug inputs (fail fast); false for infrastructure
    /// failures, which the caller's surrounding request logic may retry.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EngineError::Source(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

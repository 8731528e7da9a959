use thiserror::Error;

/// Error codes returned by the scheduler core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbtError {
    #[error("allocation failure")]
    Mem,
    #[error("invalid scheduler handle")]
    InvalidSched,
    #[error("pool access mode rejects this operation")]
    InvalidPoolAccess,
    #[error("caller is not attached to an execution stream")]
    InvalidXstream,
    #[error("scheduler structural error: {0}")]
    Sched(String),
    #[error("unknown scheduler predef")]
    InvalidSchedPredef,
}

pub type AbtResult<T> = Result<T, AbtError>;

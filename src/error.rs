use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no stock length can hold a cut of {length}")]
    InsufficientStock { length: u32 },
}

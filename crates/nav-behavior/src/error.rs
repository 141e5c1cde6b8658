use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("modulation type {0:?} is already registered")]
    DuplicateModulation(String),

    #[error("unknown modulation type {0:?}")]
    UnknownModulation(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

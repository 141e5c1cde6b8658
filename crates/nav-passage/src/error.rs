use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassageError {
    #[error("degenerate passage gates: {0}")]
    DegenerateGates(&'static str),
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PastelError {
    #[error("{0}")]
    InvalidInput(String),
}

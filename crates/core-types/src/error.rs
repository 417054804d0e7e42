use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown result code '{0}' (expected W, L or P)")]
    UnknownResultCode(String),
}

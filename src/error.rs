use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersioningError {
    #[error("Your current version ({value}) does not respect the format A.B.C")]
    Format { value: String },
    #[error("Your current version code ({value}) is not an integer")]
    VersionCode { value: String },
    #[error("{0}")]
    Configuration(String),
}

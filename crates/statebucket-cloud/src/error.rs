//! Cloud provider and bootstrap error types

use thiserror::Error;

/// Errors returned by a single provider call
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The bucket already exists and belongs to the calling account
    #[error("Bucket already owned by this account: {0}")]
    BucketAlreadyOwned(String),

    /// The bucket name is taken by another account
    #[error("Bucket name already taken: {0}")]
    BucketAlreadyExists(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;

/// Fatal errors of the bootstrap procedure
///
/// The first one encountered aborts the run. Steps that already succeeded
/// are not rolled back.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to resolve account identity: {0}")]
    IdentityResolution(String),

    #[error("Failed to create bucket {bucket}: {source}")]
    BucketCreation {
        bucket: String,
        #[source]
        source: CloudError,
    },

    #[error("Failed to apply {setting} to bucket {bucket}: {source}")]
    Configuration {
        bucket: String,
        setting: &'static str,
        #[source]
        source: CloudError,
    },

    #[error("Failed to check whether bucket {bucket} exists: {source}")]
    ExistenceProbe {
        bucket: String,
        #[source]
        source: CloudError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BootstrapError {
    /// Short tag for the error class, shown in front of the CLI `Error:` line
    pub fn kind(&self) -> &'static str {
        match self {
            BootstrapError::IdentityResolution(_) => "identity_resolution",
            BootstrapError::BucketCreation { .. } => "bucket_creation",
            BootstrapError::Configuration { .. } => "configuration",
            BootstrapError::ExistenceProbe { .. } => "existence_probe",
            BootstrapError::InvalidConfig(_) => "invalid_config",
        }
    }
}

//! AWS provider error types

use statebucket_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("STS GetCallerIdentity failed: {0}")]
    Identity(String),

    #[error("S3 {operation} failed: {message}")]
    S3 {
        operation: &'static str,
        message: String,
    },

    #[error("S3 bucket already owned by you: {0}")]
    BucketAlreadyOwnedByYou(String),

    #[error("S3 bucket name is not available: {0}")]
    BucketAlreadyExists(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, AwsError>;

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::Identity(message) => CloudError::AuthenticationFailed(message),
            AwsError::BucketAlreadyOwnedByYou(bucket) => CloudError::BucketAlreadyOwned(bucket),
            AwsError::BucketAlreadyExists(bucket) => CloudError::BucketAlreadyExists(bucket),
            AwsError::InvalidRequest(message) => CloudError::InvalidConfig(message),
            err @ AwsError::S3 { .. } => CloudError::ApiError(err.to_string()),
        }
    }
}

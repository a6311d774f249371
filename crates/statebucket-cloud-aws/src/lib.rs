//! AWS provider for statebucket
//!
//! This crate implements the StorageProvider trait with the AWS SDK:
//! STS for the caller identity and S3 for the bucket calls.
//!
//! # Requirements
//!
//! - Credentials resolvable through the standard AWS provider chain
//!   (environment, shared profile, SSO, instance metadata)
//!
//! # Example
//!
//! ```ignore
//! use statebucket_cloud::{BootstrapRequest, ensure_state_bucket};
//! use statebucket_cloud_aws::AwsStorageProvider;
//!
//! let provider = AwsStorageProvider::from_env("ap-southeast-2").await;
//! let report = ensure_state_bucket(&provider, &BootstrapRequest::default(), |_| {}).await?;
//! ```

pub mod error;
pub mod provider;
pub mod requests;

pub use error::{AwsError, Result};
pub use provider::AwsStorageProvider;

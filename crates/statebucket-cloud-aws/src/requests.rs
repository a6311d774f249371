//! S3 request payloads
//!
//! Builds the SDK configuration types sent by the provider. Kept separate so
//! the payloads can be checked without network access.

use crate::error::{AwsError, Result};
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration,
    PublicAccessBlockConfiguration, ServerSideEncryption, ServerSideEncryptionByDefault,
    ServerSideEncryptionConfiguration, ServerSideEncryptionRule, VersioningConfiguration,
};
use statebucket_cloud::{EncryptionSettings, PublicAccessBlock};

/// CreateBucket configuration; `None` means the request carries no body
pub fn create_bucket_configuration(
    location_constraint: Option<&str>,
) -> Option<CreateBucketConfiguration> {
    location_constraint.map(|location| {
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(location))
            .build()
    })
}

pub fn versioning_enabled() -> VersioningConfiguration {
    VersioningConfiguration::builder()
        .status(BucketVersioningStatus::Enabled)
        .build()
}

pub fn encryption_configuration(
    settings: &EncryptionSettings,
) -> Result<ServerSideEncryptionConfiguration> {
    if !ServerSideEncryption::values().contains(&settings.algorithm.as_str()) {
        return Err(AwsError::InvalidRequest(format!(
            "unsupported encryption algorithm: {}",
            settings.algorithm
        )));
    }
    let algorithm = ServerSideEncryption::from(settings.algorithm.as_str());

    let by_default = ServerSideEncryptionByDefault::builder()
        .sse_algorithm(algorithm)
        .build()
        .map_err(|e| AwsError::InvalidRequest(e.to_string()))?;

    let rule = ServerSideEncryptionRule::builder()
        .apply_server_side_encryption_by_default(by_default)
        .bucket_key_enabled(settings.bucket_key_enabled)
        .build();

    ServerSideEncryptionConfiguration::builder()
        .rules(rule)
        .build()
        .map_err(|e| AwsError::InvalidRequest(e.to_string()))
}

pub fn public_access_block(block: &PublicAccessBlock) -> PublicAccessBlockConfiguration {
    PublicAccessBlockConfiguration::builder()
        .block_public_acls(block.block_public_acls)
        .ignore_public_acls(block.ignore_public_acls)
        .block_public_policy(block.block_public_policy)
        .restrict_public_buckets(block.restrict_public_buckets)
        .build()
}

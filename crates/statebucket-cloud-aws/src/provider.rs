//! AWS storage provider implementation

use crate::error::AwsError;
use crate::requests;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use statebucket_cloud::{EncryptionSettings, PublicAccessBlock, StorageProvider};

/// AWS provider backed by STS and S3 clients pinned to one region
pub struct AwsStorageProvider {
    sts: aws_sdk_sts::Client,
    s3: aws_sdk_s3::Client,
    region: String,
}

impl AwsStorageProvider {
    /// Load shared AWS configuration for `region` and build the clients
    pub async fn from_env(region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;

        tracing::debug!("Loaded AWS configuration for {}", region);
        Self::new(&config, region)
    }

    /// Build the clients from an already loaded configuration
    pub fn new(config: &aws_config::SdkConfig, region: impl Into<String>) -> Self {
        Self {
            sts: aws_sdk_sts::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

fn s3_error(operation: &'static str, err: impl std::error::Error) -> AwsError {
    AwsError::S3 {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}

/// HeadBucket failure: 404 means absent, anything else is an error
fn classify_head_bucket(err: HeadBucketError) -> Result<bool, AwsError> {
    if err.is_not_found() {
        Ok(false)
    } else {
        Err(s3_error("HeadBucket", err))
    }
}

/// CreateBucket failure, keeping the two "already exists" cases apart
fn classify_create_bucket(bucket: &str, err: CreateBucketError) -> AwsError {
    if err.is_bucket_already_owned_by_you() {
        AwsError::BucketAlreadyOwnedByYou(bucket.to_string())
    } else if err.is_bucket_already_exists() {
        AwsError::BucketAlreadyExists(bucket.to_string())
    } else {
        s3_error("CreateBucket", err)
    }
}

#[async_trait]
impl StorageProvider for AwsStorageProvider {
    fn name(&self) -> &str {
        "aws"
    }

    fn display_name(&self) -> &str {
        "Amazon Web Services"
    }

    async fn caller_account_id(&self) -> statebucket_cloud::Result<String> {
        tracing::debug!("Calling sts:GetCallerIdentity");
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| AwsError::Identity(DisplayErrorContext(&e).to_string()))?;

        Ok(output.account().unwrap_or_default().to_string())
    }

    async fn bucket_exists(&self, bucket: &str) -> statebucket_cloud::Result<bool> {
        tracing::debug!("Calling s3:HeadBucket for {}", bucket);
        match self.s3.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => Ok(classify_head_bucket(err.into_service_error())?),
        }
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> statebucket_cloud::Result<()> {
        tracing::debug!(
            "Calling s3:CreateBucket for {} (location constraint: {:?})",
            bucket,
            location_constraint
        );
        let result = self
            .s3
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(requests::create_bucket_configuration(
                location_constraint,
            ))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => Err(classify_create_bucket(bucket, err.into_service_error()).into()),
        }
    }

    async fn enable_versioning(&self, bucket: &str) -> statebucket_cloud::Result<()> {
        tracing::debug!("Calling s3:PutBucketVersioning for {}", bucket);
        self.s3
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(requests::versioning_enabled())
            .send()
            .await
            .map_err(|e| s3_error("PutBucketVersioning", e))?;
        Ok(())
    }

    async fn apply_default_encryption(
        &self,
        bucket: &str,
        settings: &EncryptionSettings,
    ) -> statebucket_cloud::Result<()> {
        tracing::debug!(
            "Calling s3:PutBucketEncryption for {} ({})",
            bucket,
            settings.algorithm
        );
        let configuration = requests::encryption_configuration(settings)?;
        self.s3
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(configuration)
            .send()
            .await
            .map_err(|e| s3_error("PutBucketEncryption", e))?;
        Ok(())
    }

    async fn block_public_access(
        &self,
        bucket: &str,
        block: &PublicAccessBlock,
    ) -> statebucket_cloud::Result<()> {
        tracing::debug!("Calling s3:PutPublicAccessBlock for {}", bucket);
        self.s3
            .put_public_access_block()
            .bucket(bucket)
            .public_access_block_configuration(requests::public_access_block(block))
            .send()
            .await
            .map_err(|e| s3_error("PutPublicAccessBlock", e))?;
        Ok(())
    }
}

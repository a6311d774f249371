//! Storage provider trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Object storage provider abstraction
///
/// Every method maps to exactly one remote call. The bootstrap procedure
/// awaits each call before issuing the next.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Look up the account id of the configured credentials ("who am I")
    async fn caller_account_id(&self) -> Result<String>;

    /// Whether the bucket exists and is reachable with the current credentials
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create the bucket, pinned to `location_constraint` when given
    async fn create_bucket(&self, bucket: &str, location_constraint: Option<&str>) -> Result<()>;

    /// Turn on object versioning
    async fn enable_versioning(&self, bucket: &str) -> Result<()>;

    /// Set the default server-side encryption
    async fn apply_default_encryption(
        &self,
        bucket: &str,
        settings: &EncryptionSettings,
    ) -> Result<()>;

    /// Set the public access block
    async fn block_public_access(&self, bucket: &str, block: &PublicAccessBlock) -> Result<()>;
}

/// Default encryption applied to the state bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionSettings {
    /// Server-side encryption algorithm
    pub algorithm: String,

    /// Use a bucket-level key to reduce calls to the key service
    pub bucket_key_enabled: bool,
}

impl Default for EncryptionSettings {
    fn default() -> Self {
        Self {
            algorithm: "AES256".to_string(),
            bucket_key_enabled: true,
        }
    }
}

/// Public access block flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccessBlock {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// All four flags enabled
    pub fn all() -> Self {
        Self {
            block_public_acls: true,
            ignore_public_acls: true,
            block_public_policy: true,
            restrict_public_buckets: true,
        }
    }
}

impl Default for PublicAccessBlock {
    fn default() -> Self {
        Self::all()
    }
}

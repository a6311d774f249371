//! Bucket identity derivation

use crate::error::BootstrapError;
use serde::{Deserialize, Serialize};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// The provider's primordial region. CreateBucket rejects it as an explicit
/// location constraint.
pub const PROVIDER_DEFAULT_REGION: &str = "us-east-1";

/// Prefix of the derived bucket name
pub const DEFAULT_BUCKET_PREFIX: &str = "terraform-state-";

/// Location constraint to send with CreateBucket for `region`
///
/// Returns `None` for the provider's default region, `Some(region)` otherwise.
pub fn location_constraint_for(region: &str) -> Option<&str> {
    if region == PROVIDER_DEFAULT_REGION {
        None
    } else {
        Some(region)
    }
}

/// Account and region a state bucket belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketIdentity {
    pub account_id: String,
    pub region: String,
    bucket_name: String,
}

impl BucketIdentity {
    /// Build the identity and derive the bucket name as `prefix + account_id`
    pub fn new(
        account_id: impl Into<String>,
        region: impl Into<String>,
        prefix: &str,
    ) -> Result<Self, BootstrapError> {
        let account_id = account_id.into().trim().to_string();
        if account_id.is_empty() {
            return Err(BootstrapError::IdentityResolution(
                "identity lookup returned an empty account id".to_string(),
            ));
        }

        let bucket_name = format!("{}{}", prefix, account_id);
        validate_bucket_name(&bucket_name)?;

        Ok(Self {
            account_id,
            region: region.into(),
            bucket_name,
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn location_constraint(&self) -> Option<&str> {
        location_constraint_for(&self.region)
    }
}

/// Check a bucket name against the provider's naming rules
fn validate_bucket_name(name: &str) -> Result<(), BootstrapError> {
    let invalid = |reason: &str| {
        Err(BootstrapError::InvalidConfig(format!(
            "bucket name '{}' {}",
            name, reason
        )))
    };

    if !(3..=63).contains(&name.len()) {
        return invalid("must be between 3 and 63 characters");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return invalid("may only contain lowercase letters, digits, '-' and '.'");
    }

    let is_edge = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !is_edge(name.chars().next()) || !is_edge(name.chars().last()) {
        return invalid("must start and end with a letter or digit");
    }

    Ok(())
}

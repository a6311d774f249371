pub mod error;

pub use error::*;

use statebucket_cloud::{BootstrapRequest, DEFAULT_BUCKET_PREFIX, DEFAULT_REGION};

/// Environment variables consulted for the region, in priority order
pub const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Key of the machine-readable result line
pub const OUTPUT_KEY: &str = "TERRAFORM_STATE_BUCKET";

/// Resolve the target region
///
/// Priority:
/// 1. explicit value (`--region`)
/// 2. `AWS_REGION`
/// 3. `AWS_DEFAULT_REGION`
/// 4. `ap-southeast-2`
///
/// Blank values are skipped.
pub fn resolve_region(explicit: Option<String>) -> Result<String> {
    let from_env = || {
        REGION_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
    };

    let region = explicit
        .filter(|r| !r.trim().is_empty())
        .or_else(from_env)
        .map(|r| r.trim().to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    validate_region(&region)?;
    Ok(region)
}

fn validate_region(region: &str) -> Result<()> {
    let well_formed = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && region.contains('-')
        && !region.starts_with('-')
        && !region.ends_with('-');

    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::InvalidRegion(region.to_string()))
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let invalid = |reason| Err(ConfigError::InvalidPrefix(prefix.to_string(), reason));

    if prefix.is_empty() {
        return invalid("must not be empty");
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return invalid("may only contain lowercase letters, digits, '-' and '.'");
    }
    if !prefix
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return invalid("must start with a letter or digit");
    }
    Ok(())
}

/// Resolved runtime configuration of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub region: String,
    pub bucket_prefix: String,
    pub output_key: String,
}

impl BootstrapConfig {
    /// Resolve configuration from command-line values and the environment
    pub fn load(region: Option<String>, bucket_prefix: Option<String>) -> Result<Self> {
        let region = resolve_region(region)?;
        let bucket_prefix = bucket_prefix.unwrap_or_else(|| DEFAULT_BUCKET_PREFIX.to_string());
        validate_prefix(&bucket_prefix)?;

        Ok(Self {
            region,
            bucket_prefix,
            output_key: OUTPUT_KEY.to_string(),
        })
    }

    pub fn request(&self) -> BootstrapRequest {
        BootstrapRequest::new(Some(self.region.clone())).with_prefix(&self.bucket_prefix)
    }

    /// `KEY=value` line for the invoking pipeline
    pub fn output_line(&self, bucket: &str) -> String {
        format!("{}={}", self.output_key, bucket)
    }
}

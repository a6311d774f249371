//! Idempotent state bucket bootstrap
//!
//! Resolves the calling account, derives the bucket name, creates the bucket
//! when it is missing and then re-applies versioning, default encryption and
//! the public access block on every run. Calls are strictly sequential and the
//! first fatal error aborts the run without rolling back earlier steps.

use crate::action::{BootstrapReport, Step, StepOutcome};
use crate::error::{BootstrapError, CloudError};
use crate::identity::{BucketIdentity, DEFAULT_BUCKET_PREFIX, DEFAULT_REGION};
use crate::provider::{EncryptionSettings, PublicAccessBlock, StorageProvider};
use std::time::Instant;

/// Input of a bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    pub region: String,
    pub bucket_prefix: String,
    pub encryption: EncryptionSettings,
    pub public_access: PublicAccessBlock,
}

impl BootstrapRequest {
    /// Request for `region`, falling back to the default region when absent
    pub fn new(region: Option<String>) -> Self {
        let region = region
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            region,
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            encryption: EncryptionSettings::default(),
            public_access: PublicAccessBlock::all(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bucket_prefix = prefix.into();
        self
    }
}

impl Default for BootstrapRequest {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Progress events emitted while the procedure runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    IdentityResolved {
        account_id: String,
        bucket: String,
    },
    BucketExists {
        bucket: String,
    },
    BucketMissing {
        bucket: String,
    },
    Creating {
        bucket: String,
        location_constraint: Option<String>,
    },
    Created {
        bucket: String,
    },
    /// CreateBucket reported the bucket as already owned by the caller
    AlreadyOwned {
        bucket: String,
    },
    Applying {
        step: Step,
        bucket: String,
    },
    Applied {
        step: Step,
        bucket: String,
    },
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Progress::IdentityResolved { account_id, bucket } => {
                write!(f, "Account {} -> bucket {}", account_id, bucket)
            }
            Progress::BucketExists { bucket } => write!(f, "Bucket {} already exists", bucket),
            Progress::BucketMissing { bucket } => write!(f, "Bucket {} does not exist", bucket),
            Progress::Creating {
                bucket,
                location_constraint: Some(location),
            } => write!(f, "Creating bucket {} in {}", bucket, location),
            Progress::Creating {
                bucket,
                location_constraint: None,
            } => write!(f, "Creating bucket {} (no location constraint)", bucket),
            Progress::Created { bucket } => write!(f, "Created bucket {}", bucket),
            Progress::AlreadyOwned { bucket } => {
                write!(f, "Bucket {} is already owned by this account", bucket)
            }
            Progress::Applying { step, bucket } => {
                write!(f, "Applying {} to {}", step.setting(), bucket)
            }
            Progress::Applied { step, bucket } => {
                write!(f, "Applied {} to {}", step.setting(), bucket)
            }
        }
    }
}

/// Ensure the state bucket exists and is hardened
///
/// Returns the report of a successful run; `report.bucket_name` is the
/// resolved bucket name.
pub async fn ensure_state_bucket<P, F>(
    provider: &P,
    request: &BootstrapRequest,
    mut on_progress: F,
) -> Result<BootstrapReport, BootstrapError>
where
    P: StorageProvider + ?Sized,
    F: FnMut(&Progress),
{
    let started = Instant::now();

    let identity = resolve_identity(provider, request).await?;
    let bucket = identity.bucket_name().to_string();
    let mut report = BootstrapReport::new(&bucket, &identity.region, &identity.account_id);
    report.record(
        Step::ResolveIdentity,
        StepOutcome::Checked,
        format!("account {}", identity.account_id),
    );
    on_progress(&Progress::IdentityResolved {
        account_id: identity.account_id.clone(),
        bucket: bucket.clone(),
    });

    let exists = match provider.bucket_exists(&bucket).await {
        Ok(exists) => exists,
        Err(e) => {
            // Let CreateBucket report the real failure
            tracing::warn!("Existence probe for {} failed, treating as absent: {}", bucket, e);
            false
        }
    };

    if exists {
        tracing::info!("Bucket {} already exists, skipping creation", bucket);
        report.record(Step::ProbeBucket, StepOutcome::Checked, "exists");
        report.record(Step::CreateBucket, StepOutcome::Skipped, "already exists");
        on_progress(&Progress::BucketExists {
            bucket: bucket.clone(),
        });
    } else {
        report.record(Step::ProbeBucket, StepOutcome::Checked, "absent");
        on_progress(&Progress::BucketMissing {
            bucket: bucket.clone(),
        });
        create_bucket(provider, &identity, &mut report, &mut on_progress).await?;
    }

    on_progress(&Progress::Applying {
        step: Step::EnableVersioning,
        bucket: bucket.clone(),
    });
    let result = provider.enable_versioning(&bucket).await;
    finish_configuration(
        Step::EnableVersioning,
        &bucket,
        result,
        &mut report,
        &mut on_progress,
    )?;

    on_progress(&Progress::Applying {
        step: Step::ApplyEncryption,
        bucket: bucket.clone(),
    });
    let result = provider
        .apply_default_encryption(&bucket, &request.encryption)
        .await;
    finish_configuration(
        Step::ApplyEncryption,
        &bucket,
        result,
        &mut report,
        &mut on_progress,
    )?;

    on_progress(&Progress::Applying {
        step: Step::BlockPublicAccess,
        bucket: bucket.clone(),
    });
    let result = provider
        .block_public_access(&bucket, &request.public_access)
        .await;
    finish_configuration(
        Step::BlockPublicAccess,
        &bucket,
        result,
        &mut report,
        &mut on_progress,
    )?;

    report.finished_at = chrono::Utc::now();
    report.duration_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        "State bucket {} ready in {} ({}ms)",
        report.bucket_name,
        report.region,
        report.duration_ms
    );
    Ok(report)
}

/// Resolve the identity and check whether its bucket exists, without mutating
pub async fn probe_state_bucket<P>(
    provider: &P,
    request: &BootstrapRequest,
) -> Result<(BucketIdentity, bool), BootstrapError>
where
    P: StorageProvider + ?Sized,
{
    let identity = resolve_identity(provider, request).await?;
    let exists = provider
        .bucket_exists(identity.bucket_name())
        .await
        .map_err(|source| BootstrapError::ExistenceProbe {
            bucket: identity.bucket_name().to_string(),
            source,
        })?;
    Ok((identity, exists))
}

async fn resolve_identity<P>(
    provider: &P,
    request: &BootstrapRequest,
) -> Result<BucketIdentity, BootstrapError>
where
    P: StorageProvider + ?Sized,
{
    tracing::debug!("Resolving caller identity via {}", provider.name());
    let account_id = provider
        .caller_account_id()
        .await
        .map_err(|e| BootstrapError::IdentityResolution(e.to_string()))?;

    BucketIdentity::new(account_id, &request.region, &request.bucket_prefix)
}

async fn create_bucket<P, F>(
    provider: &P,
    identity: &BucketIdentity,
    report: &mut BootstrapReport,
    on_progress: &mut F,
) -> Result<(), BootstrapError>
where
    P: StorageProvider + ?Sized,
    F: FnMut(&Progress),
{
    let bucket = identity.bucket_name();
    let location = identity.location_constraint();
    on_progress(&Progress::Creating {
        bucket: bucket.to_string(),
        location_constraint: location.map(str::to_string),
    });

    match provider.create_bucket(bucket, location).await {
        Ok(()) => {
            tracing::info!("Created bucket {} in {}", bucket, identity.region);
            report.created = true;
            report.record(Step::CreateBucket, StepOutcome::Applied, "created");
            on_progress(&Progress::Created {
                bucket: bucket.to_string(),
            });
            Ok(())
        }
        Err(CloudError::BucketAlreadyOwned(message)) => {
            tracing::warn!(
                "Create raced with another run for {}, re-checking existence",
                bucket
            );
            match provider.bucket_exists(bucket).await {
                Ok(false) => Err(BootstrapError::BucketCreation {
                    bucket: bucket.to_string(),
                    source: CloudError::BucketAlreadyOwned(message),
                }),
                owned => {
                    // BucketAlreadyOwned proves ownership even when the re-check is denied
                    if let Err(e) = owned {
                        tracing::warn!("Re-check of {} failed, continuing as owned: {}", bucket, e);
                    }
                    report.record(
                        Step::CreateBucket,
                        StepOutcome::Skipped,
                        "already owned by this account",
                    );
                    on_progress(&Progress::AlreadyOwned {
                        bucket: bucket.to_string(),
                    });
                    Ok(())
                }
            }
        }
        Err(source) => Err(BootstrapError::BucketCreation {
            bucket: bucket.to_string(),
            source,
        }),
    }
}

fn finish_configuration<F>(
    step: Step,
    bucket: &str,
    result: crate::Result<()>,
    report: &mut BootstrapReport,
    on_progress: &mut F,
) -> Result<(), BootstrapError>
where
    F: FnMut(&Progress),
{
    result.map_err(|source| BootstrapError::Configuration {
        bucket: bucket.to_string(),
        setting: step.setting(),
        source,
    })?;

    tracing::debug!("Applied {} to {}", step.setting(), bucket);
    report.record(step, StepOutcome::Applied, "enabled");
    on_progress(&Progress::Applied {
        step,
        bucket: bucket.to_string(),
    });
    Ok(())
}

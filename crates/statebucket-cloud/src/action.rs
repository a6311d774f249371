//! Step and report types for the bootstrap procedure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single step of the bootstrap procedure, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Look up the calling account
    ResolveIdentity,
    /// Check whether the bucket exists
    ProbeBucket,
    /// Create the bucket
    CreateBucket,
    /// Enable object versioning
    EnableVersioning,
    /// Apply default server-side encryption
    ApplyEncryption,
    /// Apply the public access block
    BlockPublicAccess,
}

impl Step {
    /// Name of the bucket setting a configuration step applies
    pub fn setting(&self) -> &'static str {
        match self {
            Step::EnableVersioning => "versioning",
            Step::ApplyEncryption => "encryption",
            Step::BlockPublicAccess => "public access block",
            Step::ResolveIdentity => "identity",
            Step::ProbeBucket => "existence probe",
            Step::CreateBucket => "creation",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::ResolveIdentity => write!(f, "resolve-identity"),
            Step::ProbeBucket => write!(f, "probe-bucket"),
            Step::CreateBucket => write!(f, "create-bucket"),
            Step::EnableVersioning => write!(f, "enable-versioning"),
            Step::ApplyEncryption => write!(f, "apply-encryption"),
            Step::BlockPublicAccess => write!(f, "block-public-access"),
        }
    }
}

/// What a completed step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The call changed (or re-applied) provider state
    Applied,
    /// Nothing needed to change
    Skipped,
    /// Read-only call
    Checked,
}

/// Record of one completed step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step: Step,
    pub outcome: StepOutcome,
    pub message: String,
}

/// Result of a successful bootstrap run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Resolved state bucket name
    pub bucket_name: String,

    /// Region the bucket was bootstrapped in
    pub region: String,

    /// Account owning the bucket
    pub account_id: String,

    /// Whether this run's CreateBucket call succeeded
    ///
    /// In `us-east-1` S3 answers CreateBucket with 200 for a bucket the caller
    /// already owns, so a run that lost the create race there (or could not
    /// probe an existing bucket) still reports `true`. Elsewhere the call fails
    /// with BucketAlreadyOwnedByYou and this stays `false`.
    pub created: bool,

    /// Completed steps in order
    pub steps: Vec<StepResult>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl BootstrapReport {
    pub fn new(
        bucket_name: impl Into<String>,
        region: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            region: region.into(),
            account_id: account_id.into(),
            created: false,
            steps: Vec::new(),
            finished_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn record(&mut self, step: Step, outcome: StepOutcome, message: impl Into<String>) {
        self.steps.push(StepResult {
            step,
            outcome,
            message: message.into(),
        });
    }

    /// Steps with the given outcome
    pub fn steps_with(&self, outcome: StepOutcome) -> Vec<Step> {
        self.steps
            .iter()
            .filter(|s| s.outcome == outcome)
            .map(|s| s.step)
            .collect()
    }

    /// Whether a step ran at all
    pub fn ran(&self, step: Step) -> bool {
        self.steps.iter().any(|s| s.step == step)
    }
}

//! statebucket cloud abstraction
//!
//! This crate provides the provider abstraction and the bootstrap procedure
//! that ensures the provisioning engine's state bucket exists and is hardened.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 statebucket CLI                  │
//! │          (statebucket / ensure / status)         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               statebucket-cloud                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait StorageProvider { ... }            │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Identity    │  │  Bootstrap   │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │      aws      │
//! │   provider    │
//! └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use statebucket_cloud::{BootstrapRequest, ensure_state_bucket};
//!
//! let request = BootstrapRequest::new(Some("ap-southeast-2".to_string()));
//! let report = ensure_state_bucket(&provider, &request, |p| println!("{p}")).await?;
//! println!("TERRAFORM_STATE_BUCKET={}", report.bucket_name);
//! ```

pub mod action;
pub mod bootstrap;
pub mod error;
pub mod identity;
pub mod provider;

// Re-exports
pub use action::{BootstrapReport, Step, StepOutcome};
pub use bootstrap::{BootstrapRequest, Progress, ensure_state_bucket, probe_state_bucket};
pub use error::{BootstrapError, CloudError, Result};
pub use identity::{
    BucketIdentity, DEFAULT_BUCKET_PREFIX, DEFAULT_REGION, PROVIDER_DEFAULT_REGION,
    location_constraint_for,
};
pub use provider::{EncryptionSettings, PublicAccessBlock, StorageProvider};

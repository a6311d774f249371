use async_trait::async_trait;
use statebucket_cloud::{CloudError, EncryptionSettings, PublicAccessBlock, StorageProvider};
use std::collections::HashSet;
use std::sync::Mutex;

/// A provider call as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Identity,
    Exists(String),
    Create {
        bucket: String,
        location_constraint: Option<String>,
    },
    Versioning(String),
    Encryption(String, EncryptionSettings),
    PublicAccess(String, PublicAccessBlock),
}

/// Failure to inject into one kind of call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    Identity,
    Probe,
    CreateTaken,
    CreateRace,
    Versioning,
    Encryption,
    PublicAccess,
}

/// In-memory provider that records every call
pub struct FakeProvider {
    account_id: String,
    buckets: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    failures: Vec<Fail>,
}

impl FakeProvider {
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            buckets: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            failures: Vec::new(),
        }
    }

    pub fn with_bucket(self, bucket: &str) -> Self {
        self.buckets.lock().unwrap().insert(bucket.to_string());
        self
    }

    pub fn failing(mut self, fail: Fail) -> Self {
        self.failures.push(fail);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn create_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fails(&self, fail: Fail) -> bool {
        self.failures.contains(&fail)
    }
}

#[async_trait]
impl StorageProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn display_name(&self) -> &str {
        "Fake"
    }

    async fn caller_account_id(&self) -> statebucket_cloud::Result<String> {
        self.record(Call::Identity);
        if self.fails(Fail::Identity) {
            return Err(CloudError::AuthenticationFailed(
                "no credentials".to_string(),
            ));
        }
        Ok(self.account_id.clone())
    }

    async fn bucket_exists(&self, bucket: &str) -> statebucket_cloud::Result<bool> {
        self.record(Call::Exists(bucket.to_string()));
        if self.fails(Fail::Probe) {
            return Err(CloudError::ApiError("403 Forbidden".to_string()));
        }
        Ok(self.buckets.lock().unwrap().contains(bucket))
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> statebucket_cloud::Result<()> {
        self.record(Call::Create {
            bucket: bucket.to_string(),
            location_constraint: location_constraint.map(str::to_string),
        });
        if self.fails(Fail::CreateTaken) {
            return Err(CloudError::BucketAlreadyExists(bucket.to_string()));
        }
        if self.fails(Fail::CreateRace) {
            // Another run won between probe and create
            self.buckets.lock().unwrap().insert(bucket.to_string());
            return Err(CloudError::BucketAlreadyOwned(bucket.to_string()));
        }
        self.buckets.lock().unwrap().insert(bucket.to_string());
        Ok(())
    }

    async fn enable_versioning(&self, bucket: &str) -> statebucket_cloud::Result<()> {
        self.record(Call::Versioning(bucket.to_string()));
        if self.fails(Fail::Versioning) {
            return Err(CloudError::ApiError("AccessDenied".to_string()));
        }
        Ok(())
    }

    async fn apply_default_encryption(
        &self,
        bucket: &str,
        settings: &EncryptionSettings,
    ) -> statebucket_cloud::Result<()> {
        self.record(Call::Encryption(bucket.to_string(), settings.clone()));
        if self.fails(Fail::Encryption) {
            return Err(CloudError::ApiError("AccessDenied".to_string()));
        }
        Ok(())
    }

    async fn block_public_access(
        &self,
        bucket: &str,
        block: &PublicAccessBlock,
    ) -> statebucket_cloud::Result<()> {
        self.record(Call::PublicAccess(bucket.to_string(), *block));
        if self.fails(Fail::PublicAccess) {
            return Err(CloudError::ApiError("AccessDenied".to_string()));
        }
        Ok(())
    }
}

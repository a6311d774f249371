use crate::render;
use colored::Colorize;
use statebucket_cloud::{StorageProvider, ensure_state_bucket};
use statebucket_cloud_aws::AwsStorageProvider;
use statebucket_config::BootstrapConfig;
use std::io::Write;

pub async fn handle(config: &BootstrapConfig, json: bool) -> anyhow::Result<()> {
    let provider = AwsStorageProvider::from_env(&config.region).await;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&provider, config, json, &mut out).await
}

/// Run the bootstrap against `provider`, writing everything meant for stdout to `out`
///
/// The result line is written only after every step succeeded, and always last.
pub async fn run<P, W>(
    provider: &P,
    config: &BootstrapConfig,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    P: StorageProvider + ?Sized,
    W: Write,
{
    writeln!(out, "{}", "Bootstrapping state bucket...".bold())?;
    writeln!(out, "Region:  {}", config.region.cyan())?;

    let report = ensure_state_bucket(provider, &config.request(), |event| {
        if let Err(e) = render::progress(out, event) {
            tracing::warn!("Failed to write progress line: {}", e);
        }
    })
    .await?;

    if report.created {
        writeln!(out, "{}", "✓ State bucket created and configured".green().bold())?;
    } else {
        writeln!(out, "{}", "✓ State bucket configured".green().bold())?;
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    // Must stay the last stdout line
    writeln!(out, "{}", config.output_line(&report.bucket_name))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use statebucket_cloud::{
        BootstrapError, CloudError, EncryptionSettings, PublicAccessBlock, Step,
    };
    use statebucket_config::OUTPUT_KEY;
    use std::sync::Mutex;

    const RESULT_LINE: &str = "TERRAFORM_STATE_BUCKET=terraform-state-453430506965";

    /// In-memory provider that can fail one step
    struct StubProvider {
        existing: Mutex<bool>,
        fail_at: Option<Step>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                existing: Mutex::new(false),
                fail_at: None,
            }
        }

        fn failing_at(step: Step) -> Self {
            Self {
                fail_at: Some(step),
                ..Self::new()
            }
        }

        fn check(&self, step: Step) -> statebucket_cloud::Result<()> {
            if self.fail_at == Some(step) {
                Err(CloudError::ApiError(format!("{} denied", step)))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StorageProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn display_name(&self) -> &str {
            "Stub"
        }

        async fn caller_account_id(&self) -> statebucket_cloud::Result<String> {
            Ok("453430506965".to_string())
        }

        async fn bucket_exists(&self, _bucket: &str) -> statebucket_cloud::Result<bool> {
            Ok(*self.existing.lock().unwrap())
        }

        async fn create_bucket(
            &self,
            _bucket: &str,
            _location_constraint: Option<&str>,
        ) -> statebucket_cloud::Result<()> {
            self.check(Step::CreateBucket)?;
            *self.existing.lock().unwrap() = true;
            Ok(())
        }

        async fn enable_versioning(&self, _bucket: &str) -> statebucket_cloud::Result<()> {
            self.check(Step::EnableVersioning)
        }

        async fn apply_default_encryption(
            &self,
            _bucket: &str,
            _settings: &EncryptionSettings,
        ) -> statebucket_cloud::Result<()> {
            self.check(Step::ApplyEncryption)
        }

        async fn block_public_access(
            &self,
            _bucket: &str,
            _block: &PublicAccessBlock,
        ) -> statebucket_cloud::Result<()> {
            self.check(Step::BlockPublicAccess)
        }
    }

    fn config() -> BootstrapConfig {
        BootstrapConfig {
            region: "ap-southeast-2".to_string(),
            bucket_prefix: "terraform-state-".to_string(),
            output_key: OUTPUT_KEY.to_string(),
        }
    }

    async fn run_to_string(
        provider: &StubProvider,
        json: bool,
    ) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = run(provider, &config(), json, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_result_line_is_last() {
        let provider = StubProvider::new();

        let (result, output) = run_to_string(&provider, false).await;

        result.unwrap();
        assert!(output.contains("Creating bucket terraform-state-453430506965"));
        assert!(output.contains("created and configured"));
        assert_eq!(output.lines().last(), Some(RESULT_LINE));
        assert_eq!(output.matches(RESULT_LINE).count(), 1);
    }

    #[tokio::test]
    async fn test_rerun_prints_same_result_line() {
        let provider = StubProvider::new();

        let (first, _) = run_to_string(&provider, false).await;
        let (second, output) = run_to_string(&provider, false).await;

        first.unwrap();
        second.unwrap();
        assert!(output.contains("already exists"));
        assert!(!output.contains("Creating bucket"));
        assert_eq!(output.lines().last(), Some(RESULT_LINE));
    }

    #[tokio::test]
    async fn test_json_report_precedes_result_line() {
        let provider = StubProvider::new();

        let (result, output) = run_to_string(&provider, true).await;

        result.unwrap();
        assert_eq!(output.lines().last(), Some(RESULT_LINE));

        let start = output.find('{').unwrap();
        let end = output.rfind('}').unwrap();
        let report: serde_json::Value = serde_json::from_str(&output[start..=end]).unwrap();
        assert_eq!(report["bucket_name"], "terraform-state-453430506965");
        assert_eq!(report["created"], true);
        assert!(end < output.find(RESULT_LINE).unwrap());
    }

    #[tokio::test]
    async fn test_failed_create_prints_no_result_line() {
        let provider = StubProvider::failing_at(Step::CreateBucket);

        let (result, output) = run_to_string(&provider, true).await;

        let err = result.unwrap_err();
        let err = err.downcast_ref::<BootstrapError>().unwrap();
        assert_eq!(err.kind(), "bucket_creation");
        assert!(output.contains("Creating bucket"));
        assert!(!output.contains("TERRAFORM_STATE_BUCKET="));
        assert!(!output.contains("\"bucket_name\""));
    }

    #[tokio::test]
    async fn test_failed_configuration_prints_no_result_line() {
        for step in [
            Step::EnableVersioning,
            Step::ApplyEncryption,
            Step::BlockPublicAccess,
        ] {
            let provider = StubProvider::failing_at(step);

            let (result, output) = run_to_string(&provider, false).await;

            let err = result.unwrap_err();
            let err = err.downcast_ref::<BootstrapError>().unwrap();
            assert_eq!(err.kind(), "configuration");
            assert!(err.to_string().contains(step.setting()));
            assert!(output.contains(&format!("Applying {}", step.setting())));
            assert!(!output.contains("TERRAFORM_STATE_BUCKET="));
        }
    }
}

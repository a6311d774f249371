use colored::Colorize;
use statebucket_cloud::probe_state_bucket;
use statebucket_cloud_aws::AwsStorageProvider;
use statebucket_config::BootstrapConfig;

pub async fn handle(config: &BootstrapConfig, json: bool) -> anyhow::Result<()> {
    let provider = AwsStorageProvider::from_env(&config.region).await;
    let (identity, exists) = probe_state_bucket(&provider, &config.request()).await?;

    if json {
        let status = serde_json::json!({
            "bucket_name": identity.bucket_name(),
            "account_id": identity.account_id,
            "region": identity.region,
            "exists": exists,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Account: {}", identity.account_id.cyan());
    println!("Region:  {}", identity.region.cyan());
    println!("Bucket:  {}", identity.bucket_name().cyan());
    if exists {
        println!("{}", "✓ exists".green());
    } else {
        println!("{}", "✗ does not exist (run `statebucket` to create it)".yellow());
    }
    Ok(())
}

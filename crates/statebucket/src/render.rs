use colored::Colorize;
use statebucket_cloud::Progress;
use std::io::{self, Write};

/// Write one progress event as a human-readable line
pub fn progress<W: Write + ?Sized>(out: &mut W, event: &Progress) -> io::Result<()> {
    match event {
        Progress::IdentityResolved { account_id, bucket } => {
            writeln!(out, "Account: {}", account_id.cyan())?;
            writeln!(out, "Bucket:  {}", bucket.cyan())
        }
        Progress::BucketExists { .. } => {
            writeln!(out, "{}", format!("✓ {}", event).green())
        }
        Progress::BucketMissing { .. } => {
            writeln!(out, "{}", format!("• {}", event).yellow())
        }
        Progress::Creating { .. } | Progress::Applying { .. } => {
            writeln!(out, "{}", format!("{}...", event).blue())
        }
        Progress::Created { .. }
        | Progress::AlreadyOwned { .. }
        | Progress::Applied { .. } => {
            writeln!(out, "  {}", format!("✓ {}", event).green())
        }
    }
}

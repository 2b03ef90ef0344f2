//! Human-readable status lines for each fetch.

use crate::{DownloadError, Outcome};

pub fn status_lines(url: &str, result: &Result<Outcome, DownloadError>) -> Vec<String> {
    match result {
        Ok(Outcome::Saved(download)) => vec![
            format!("✔️ Successfully fetched: {}", download.file_name),
            format!("✔️ Image saved to {}", download.file.display()),
        ],
        Ok(Outcome::Skipped { file_name, .. }) => {
            vec![format!("ℹ️ Skipping download: {} already exists.", file_name)]
        }
        Ok(Outcome::Rejected(rejection)) => vec![format!("❌ {}", rejection)],
        Err(err) if err.is_connection_error() => {
            vec![format!("❌ Connection error for {}: {}", url, err)]
        }
        Err(err) => vec![format!("❌ An unexpected error occurred for {}: {}", url, err)],
    }
}

/// Per-run tally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub saved: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, result: &Result<Outcome, DownloadError>) {
        match result {
            Ok(Outcome::Saved(_)) => self.saved += 1,
            Ok(Outcome::Skipped { .. }) => self.skipped += 1,
            Ok(Outcome::Rejected(_)) => self.rejected += 1,
            Err(_) => self.failed += 1,
        }
    }
}

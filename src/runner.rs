//! The fetch loop: banner, one pass over the URLs, closing line.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::report::{self, Summary};
use crate::{Downloader, FileDownloader};

/// Fails only when the output directory cannot be prepared; per-URL failures
/// are reported to `out` and counted in the returned summary.
pub fn run<T, W>(output_dir: &Path, fetcher: T, urls: &[&str], out: &mut W) -> Result<Summary>
where
    T: FileDownloader,
    W: Write,
{
    writeln!(out, "Welcome to the Ubuntu Image Fetcher")?;
    writeln!(out, "A tool for mindfully collecting images from the web\n")?;

    let downloader = Downloader::with_fetcher(output_dir, fetcher).with_context(|| {
        format!(
            "failed to create output directory {}",
            output_dir.display()
        )
    })?;

    let mut summary = Summary::default();

    for url in urls {
        writeln!(out, "\nAttempting to download from: {}", url)?;

        let result = downloader.download(url);

        for line in report::status_lines(url, &result) {
            writeln!(out, "{}", line)?;
        }

        summary.record(&result);
    }

    writeln!(out, "\nConnection strengthened. Community enriched.")?;

    info!(
        saved = summary.saved,
        skipped = summary.skipped,
        rejected = summary.rejected,
        failed = summary.failed,
        "run finished"
    );

    Ok(summary)
}

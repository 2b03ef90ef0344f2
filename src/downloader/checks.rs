//! Header and body checks applied before anything is written to disk.

use std::io::{self, Read};

use image::ImageFormat;

use super::DownloadError;

pub const MAX_SIZE_MB: u64 = 5;

pub const MAX_SIZE_BYTES: u64 = MAX_SIZE_MB * 1024 * 1024;

pub fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Parses the raw `Content-Length` header. A missing header counts as zero.
pub fn declared_length(content_length: Option<&str>) -> Result<u64, DownloadError> {
    match content_length {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| DownloadError::InvalidContentLength(raw.to_string())),
    }
}

/// Reads at most `limit` bytes. Returns `None` when the body is longer.
pub fn read_capped<R: Read>(body: R, limit: u64) -> io::Result<Option<Vec<u8>>> {
    let mut buffer = Vec::new();

    body.take(limit + 1).read_to_end(&mut buffer)?;

    if buffer.len() as u64 > limit {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

/// Checks the body's magic bytes when the declared type is a format we can sniff.
///
/// Types unknown to `image` (svg, heic, ...) pass unchecked, and so does TGA,
/// which carries no signature.
pub fn matches_declared_format(content_type: &str, body: &[u8]) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    match ImageFormat::from_mime_type(essence) {
        None | Some(ImageFormat::Tga) => true,
        Some(_) => image::guess_format(body).is_ok(),
    }
}

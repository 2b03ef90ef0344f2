//! Local filename derivation.

use url::Url;

/// Used when the URL path has no usable last segment.
pub const DEFAULT_FILENAME: &str = "downloaded_image.jpg";

/// Returns the last segment of the URL path, as it appears in the URL.
///
/// Query and fragment never contribute. Percent escapes are kept, so the
/// result cannot contain a path separator.
pub fn derive_filename(url: &Url) -> String {
    url.path()
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

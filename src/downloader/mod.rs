mod checks;
mod fetcher;
mod filename;

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub use checks::{MAX_SIZE_BYTES, MAX_SIZE_MB};
pub use fetcher::UReqFetcher;
pub use filename::DEFAULT_FILENAME;

/// Headers of a successful response plus the unread body.
pub struct Reply {
    content_type: Option<String>,
    content_length: Option<String>,
    body: Box<dyn Read + Send>,
}

impl Reply {
    pub fn new<R>(content_type: Option<String>, content_length: Option<String>, body: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            content_type,
            content_length,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Response {
    Ok(Reply),
    NotFound,
    Status(u16),
    NetworkError(String),
}

impl Response {
    pub fn ok(reply: Reply) -> Self {
        Self::Ok(reply)
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn status(code: u16) -> Self {
        Self::Status(code)
    }

    pub fn network_error(reason: String) -> Self {
        Self::NetworkError(reason)
    }
}

pub trait FileDownloader {
    fn fetch(&self, url: &str) -> Response;
}

pub struct Downloader<T: FileDownloader> {
    fetcher: T,
    path: PathBuf,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP 404 Not Found")]
    NotFound,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    InvalidBody(#[source] io::Error),

    #[error("invalid Content-Length header: {0:?}")]
    InvalidContentLength(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DownloadError {
    /// Errors raised by the request itself, as opposed to local failures.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Status(_) | Self::Network(_) | Self::InvalidBody(_)
        )
    }
}

/// Why a response was not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAnImage { content_type: String },
    TooLarge { size: u64 },
    BodyTooLarge,
    Unrecognized { content_type: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAnImage { content_type } => write!(
                f,
                "Warning: URL does not appear to be an image. Content-Type: {}",
                content_type
            ),
            Rejection::TooLarge { size } => write!(
                f,
                "Skipping download: File size ({} bytes) exceeds the limit of {} MB.",
                size, MAX_SIZE_MB
            ),
            Rejection::BodyTooLarge => write!(
                f,
                "Skipping download: Response body exceeds the limit of {} MB.",
                MAX_SIZE_MB
            ),
            Rejection::Unrecognized { content_type } => write!(
                f,
                "Warning: Response body is not a recognizable image (declared {}).",
                content_type
            ),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file_name: String,
    pub file: PathBuf,
    pub content: Vec<u8>,
}

impl Download {
    pub fn new(source: String, file_name: String, file: PathBuf, content: Vec<u8>) -> Self {
        Self {
            source,
            file_name,
            file,
            content,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Saved(Download),
    /// The target file existed before any request was made.
    Skipped { file_name: String, file: PathBuf },
    Rejected(Rejection),
}

impl<T> Downloader<T>
where
    T: FileDownloader,
{
    /// Creates the output directory (and parents) if it is missing.
    pub fn with_fetcher<P: AsRef<Path>>(path: P, fetcher: T) -> io::Result<Self> {
        let path = Self::create_output_dir(path.as_ref())?;

        Ok(Downloader { path, fetcher })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn download(&self, url: &str) -> Result<Outcome, DownloadError> {
        let url = Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let file_name = filename::derive_filename(&url);
        let file_path = self.path.join(&file_name);

        // A dangling symlink still occupies the name.
        if fs::symlink_metadata(&file_path).is_ok() {
            debug!(file = %file_path.display(), "target exists, not requesting");
            return Ok(Outcome::Skipped {
                file_name,
                file: file_path,
            });
        }

        let reply = match self.fetcher.fetch(url.as_str()) {
            Response::Ok(reply) => reply,
            Response::NotFound => return Err(DownloadError::NotFound),
            Response::Status(code) => return Err(DownloadError::Status(code)),
            Response::NetworkError(reason) => return Err(DownloadError::Network(reason)),
        };

        let content_type = reply.content_type.unwrap_or_default();

        if !checks::is_image(&content_type) {
            info!(%url, content_type = %content_type, "rejected non-image response");
            return Ok(Outcome::Rejected(Rejection::NotAnImage { content_type }));
        }

        let size = checks::declared_length(reply.content_length.as_deref())?;

        if size > MAX_SIZE_BYTES {
            info!(%url, size, "rejected oversized response");
            return Ok(Outcome::Rejected(Rejection::TooLarge { size }));
        }

        let Some(body) =
            checks::read_capped(reply.body, MAX_SIZE_BYTES).map_err(DownloadError::InvalidBody)?
        else {
            info!(%url, "response body ran past the size limit");
            return Ok(Outcome::Rejected(Rejection::BodyTooLarge));
        };

        if !checks::matches_declared_format(&content_type, &body) {
            info!(%url, content_type = %content_type, "body does not carry an image signature");
            return Ok(Outcome::Rejected(Rejection::Unrecognized { content_type }));
        }

        self.persist(&file_path, &body)?;

        info!(%url, file = %file_path.display(), bytes = body.len(), "saved");

        Ok(Outcome::Saved(Download::new(
            String::from(url),
            file_name,
            file_path,
            body,
        )))
    }

    /// Writes through a temporary file so the final name only ever holds a
    /// complete body.
    fn persist(&self, file_path: &Path, body: &[u8]) -> io::Result<()> {
        let mut temp = tempfile::Builder::new()
            .prefix(".fetch-")
            .suffix(".part")
            .tempfile_in(&self.path)?;

        temp.write_all(body)?;
        temp.flush()?;

        temp.persist_noclobber(file_path).map_err(|err| err.error)?;

        Ok(())
    }

    /// Fails when `path` exists but is not a directory.
    fn create_output_dir(path: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(path)?;

        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
pub(crate) use fetcher::MockFetcher;

mod downloader;

pub mod cli;
pub mod logging;
pub mod report;
pub mod runner;

pub use downloader::{
    Download, DownloadError, Downloader, FileDownloader, Outcome, Rejection, Reply, Response,
    UReqFetcher, DEFAULT_FILENAME, MAX_SIZE_BYTES, MAX_SIZE_MB,
};

//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

/// Fetched when no URLs are given. The third entry does not exist and the
/// fourth repeats the second.
pub const DEFAULT_URLS: [&str; 4] = [
    "https://upload.wikimedia.org/wikipedia/commons/4/4e/Apollo_11_launch_-_GPN-2000-001095.jpg",
    "https://www.nasa.gov/sites/default/files/styles/full_width_feature/public/thumbnails/image/main_image_star-forming_region_ngc346_hubble_nasa.jpg",
    "https://www.google.com/nonexistent_image.png",
    "https://www.nasa.gov/sites/default/files/styles/full_width_feature/public/thumbnails/image/main_image_star-forming_region_ngc346_hubble_nasa.jpg",
];

#[derive(Parser, Debug)]
#[command(version, about = "Mindfully collect images from the web", long_about = None)]
pub struct Cli {
    /// Image URLs to fetch, in order (defaults to the built-in list)
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Directory the images are saved to
    #[arg(short, long, value_name = "DIR", default_value = "Fetched_Images")]
    pub output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECONDS", default_value = "10")]
    pub timeout: u64,

    /// Log debug diagnostics to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Cli {
    pub fn urls(&self) -> Vec<&str> {
        if self.urls.is_empty() {
            DEFAULT_URLS.to_vec()
        } else {
            self.urls.iter().map(String::as_str).collect()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

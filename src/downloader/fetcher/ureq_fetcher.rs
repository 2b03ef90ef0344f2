use std::time::Duration;

use tracing::debug;
use ureq::Error::Status;
use ureq::{Agent, AgentBuilder};

use super::{FileDownloader, Reply, Response};

const USER_AGENT: &str = concat!("image-fetcher/", env!("CARGO_PKG_VERSION"));

/// Blocking fetcher backed by a `ureq` agent.
pub struct UReqFetcher {
    agent: Agent,
}

impl FileDownloader for UReqFetcher {
    fn fetch(&self, url: &str) -> Response {
        debug!(url, "GET");

        match self.agent.get(url).call() {
            Ok(response) => {
                let content_type = response.header("Content-Type").map(str::to_string);
                let content_length = response.header("Content-Length").map(str::to_string);

                debug!(
                    status = response.status(),
                    content_type = content_type.as_deref().unwrap_or(""),
                    content_length = content_length.as_deref().unwrap_or(""),
                    "response headers received"
                );

                Response::ok(Reply::new(
                    content_type,
                    content_length,
                    response.into_reader(),
                ))
            }

            Err(Status(404, _)) => Response::not_found(),

            Err(Status(code, _)) => Response::status(code),

            Err(err) => Response::network_error(err.to_string()),
        }
    }
}

impl UReqFetcher {
    /// `timeout` bounds connecting and each individual read, not the whole
    /// transfer: a slow body keeps going as long as bytes keep arriving.
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .user_agent(USER_AGENT)
            .build();

        UReqFetcher { agent }
    }
}

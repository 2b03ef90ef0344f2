//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each route answers with a fixed status, content type and body. Every
//! response closes the connection.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    /// Overrides the real body length in `Content-Length`.
    pub declared_length: Option<u64>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
    /// Sends the body in pieces of this size with a pause after each.
    pub pace: Option<(usize, Duration)>,
}

impl Route {
    pub fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            content_type: Some(content_type),
            declared_length: None,
            body,
            delay: None,
            pace: None,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            declared_length: None,
            body: b"<html>error</html>".to_vec(),
            delay: None,
            pace: None,
        }
    }
}

/// Starts the server in a background thread and returns its base URL
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });

    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone.png", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<&'static str, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let route = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| Route::status("404 Not Found"));

    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }

    let mut head = format!("HTTP/1.1 {}\r\nConnection: close\r\n", route.status);
    if let Some(content_type) = route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    let length = route.declared_length.unwrap_or(route.body.len() as u64);
    head.push_str(&format!("Content-Length: {}\r\n\r\n", length));

    let _ = stream.write_all(head.as_bytes());
    match route.pace {
        Some((size, gap)) => {
            for piece in route.body.chunks(size.max(1)) {
                let _ = stream.flush();
                thread::sleep(gap);
                if stream.write_all(piece).is_err() {
                    return;
                }
            }
        }
        None => {
            let _ = stream.write_all(&route.body);
        }
    }
    let _ = stream.flush();
}

//! Shared test support for suites that talk to a portal over HTTP.
//!
//! [`StubPortal`] binds a loopback listener, answers exactly one request
//! with a canned status and body, and hands the captured request back to
//! the test. Request bodies may arrive with a `Content-Length` or chunked.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// A request received by [`StubPortal`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request method, such as `POST`.
    pub method: String,
    /// Request target including the query string.
    pub target: String,
    /// Header names (lowercased) and values in arrival order.
    pub headers: Vec<(String, String)>,
    /// The decoded request body.
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// Return the first header value named `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Return the body as lossy UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A one-shot HTTP server on `127.0.0.1`.
pub struct StubPortal {
    base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl StubPortal {
    /// Start a server that answers its first request with `status` and
    /// `body`.
    pub fn respond_with(status: u16, reason: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept request");
            serve_once(stream, status, reason, body)
        });
        Self {
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }

    /// Return the API base URL to hand to the client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait for the request to be served and return it.
    pub fn captured(self) -> CapturedRequest {
        self.handle.join().expect("stub server thread")
    }
}

fn serve_once(
    stream: TcpStream,
    status: u16,
    reason: &str,
    body: &str,
) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let request = read_request(&mut reader);

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .expect("write response");
    stream.flush().expect("flush response");
    request
}

fn read_request(reader: &mut impl BufRead) -> CapturedRequest {
    let request_line = read_line(reader);
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let target = parts.next().unwrap_or_default().to_owned();

    let mut headers = Vec::new();
    loop {
        let line = read_line(reader);
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_owned()));
        }
    }

    let header = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    let body = if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        read_chunked(reader)
    } else {
        let len = header("content-length").map_or(0, |v| v.parse().expect("numeric length"));
        let mut body = vec![0; len];
        reader.read_exact(&mut body).expect("read body");
        body
    };

    CapturedRequest {
        method,
        target,
        headers,
        body,
    }
}

fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let size_line = read_line(reader);
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16).expect("chunk size");
        if size == 0 {
            // Trailers end with an empty line.
            while !read_line(reader).is_empty() {}
            return body;
        }
        let mut chunk = vec![0; size];
        reader.read_exact(&mut chunk).expect("read chunk");
        body.extend_from_slice(&chunk);
        read_line(reader);
    }
}

fn read_line(reader: &mut impl BufRead) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read line");
    line.trim_end_matches(['\r', '\n']).to_owned()
}

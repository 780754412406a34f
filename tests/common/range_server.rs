//! Minimal HTTP/1.1 server that supports HEAD and Range GET for integration tests.
//!
//! Serves several static bodies, one per path. Responds to HEAD with the
//! body's Content-Length and to GET with Range with 206 Partial Content.
//! Every request is recorded so tests can check what the client sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What the HEAD response says about the body length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthHeader {
    /// The real body length.
    Exact,
    /// No Content-Length header at all.
    Omit,
    /// A literal header value, valid or not.
    Raw(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// Status returned to HEAD requests.
    pub head_status: u16,
    /// If set, every GET is answered with this status and no body.
    pub get_status: Option<u16>,
    /// Content-Length sent with HEAD responses.
    pub length_header: LengthHeader,
    /// Delay before a GET response is written.
    pub get_delay: Duration,
    /// If true, GET ignores Range and always returns 200 with the full body.
    pub ignore_range: bool,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            get_status: None,
            length_header: LengthHeader::Exact,
            get_delay: Duration::ZERO,
            ignore_range: false,
        }
    }
}

/// A request as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw value of the Range header, if any.
    pub range: Option<String>,
}

#[derive(Default)]
struct Stats {
    active_gets: AtomicUsize,
    max_active_gets: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

struct Resource {
    body: Vec<u8>,
    opts: RangeServerOptions,
}

/// Handle on a running server. The server runs until the process exits.
pub struct RangeServer {
    base: String,
    stats: Arc<Stats>,
}

impl RangeServer {
    /// Full URL of `name` on this server.
    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.stats.requests.lock().unwrap().clone()
    }

    /// Requests received for `name` with `method`.
    pub fn requests_for(&self, method: &str, name: &str) -> Vec<RecordedRequest> {
        let path = format!("/{}", name);
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Highest number of GET requests that were waiting for their response
    /// at the same time.
    pub fn max_active_gets(&self) -> usize {
        self.stats.max_active_gets.load(Ordering::SeqCst)
    }
}

/// Starts a server serving every `(name, body)` pair at `/<name>`.
pub fn start(files: Vec<(&str, Vec<u8>)>) -> RangeServer {
    start_with_options(
        files
            .into_iter()
            .map(|(name, body)| (name, body, RangeServerOptions::default()))
            .collect(),
    )
}

/// Like `start` but allows customizing the behavior of each path.
pub fn start_with_options(files: Vec<(&str, Vec<u8>, RangeServerOptions)>) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let resources: Arc<HashMap<String, Resource>> = Arc::new(
        files
            .into_iter()
            .map(|(name, body, opts)| (format!("/{}", name), Resource { body, opts }))
            .collect(),
    );
    let stats = Arc::new(Stats::default());

    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let resources = Arc::clone(&resources);
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &resources, &stats));
        }
    });

    RangeServer {
        base: format!("http://127.0.0.1:{}/", port),
        stats,
    }
}

fn handle(mut stream: TcpStream, resources: &HashMap<String, Resource>, stats: &Stats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(10)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(10)));

    let Some(head) = read_head(&mut stream) else {
        return;
    };
    let (method, path, range) = parse_request(&head);
    stats.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        range: range.clone(),
    });

    let Some(resource) = resources.get(&path) else {
        write_status(&mut stream, "404 Not Found");
        return;
    };
    let total = resource.body.len() as u64;

    if method.eq_ignore_ascii_case("HEAD") {
        if resource.opts.head_status != 200 {
            write_status(&mut stream, &status_line(resource.opts.head_status));
            return;
        }
        let length = match resource.opts.length_header {
            LengthHeader::Exact => format!("Content-Length: {}\r\n", total),
            LengthHeader::Omit => String::new(),
            LengthHeader::Raw(value) => format!("Content-Length: {}\r\n", value),
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\n{}Accept-Ranges: bytes\r\nConnection: close\r\n\r\n",
            length
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        let active = stats.active_gets.fetch_add(1, Ordering::SeqCst) + 1;
        stats.max_active_gets.fetch_max(active, Ordering::SeqCst);

        if !resource.opts.get_delay.is_zero() {
            thread::sleep(resource.opts.get_delay);
        }
        // Released before responding: the client still holds its slot here.
        stats.active_gets.fetch_sub(1, Ordering::SeqCst);

        match resource.opts.get_status {
            Some(status) => write_status(&mut stream, &status_line(status)),
            None => {
                let range = range.as_deref().filter(|_| !resource.opts.ignore_range);
                write_body(&mut stream, &resource.body, total, range)
            }
        }
        return;
    }

    write_status(&mut stream, "405 Method Not Allowed");
}

fn write_body(stream: &mut TcpStream, body: &[u8], total: u64, range: Option<&str>) {
    let (status, content_range, slice) = match range.and_then(parse_range) {
        Some((start, end_incl)) => {
            let end_incl = end_incl.min(total.saturating_sub(1));
            if start > end_incl || start >= total {
                ("416 Range Not Satisfiable", format!("bytes */{}", total), &body[0..0])
            } else {
                let slice = &body[start as usize..=end_incl as usize];
                (
                    "206 Partial Content",
                    format!("bytes {}-{}/{}", start, end_incl, total),
                    slice,
                )
            }
        }
        None => ("200 OK", String::new(), body),
    };
    let content_range = match content_range.is_empty() {
        true => String::new(),
        false => format!("Content-Range: {}\r\n", content_range),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        slice.len(),
        content_range
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(slice);
}

fn write_status(stream: &mut TcpStream, status: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status
    );
    let _ = stream.write_all(response.as_bytes());
}

fn status_line(status: u16) -> String {
    let reason = match status {
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    format!("{} {}", status, reason)
}

/// Reads until the end of the request head.
fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(head).ok()
}

/// Returns (method, path, raw Range header value).
fn parse_request(request: &str) -> (String, String, Option<String>) {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("").to_string();

    let mut range = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                range = Some(value.trim().to_string());
            }
        }
    }
    (method, path, range)
}

/// Parses `bytes=X-Y` into (start, end_inclusive).
pub fn parse_range(value: &str) -> Option<(u64, u64)> {
    let spec = value.trim().strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = match end.trim() {
        "" => u64::MAX,
        end => end.parse::<u64>().ok()?,
    };
    Some((start, end))
}

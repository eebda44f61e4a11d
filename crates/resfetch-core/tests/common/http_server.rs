//! Minimal HTTP/1.1 server for integration tests: GET, HEAD and PUT on an
//! in-memory path -> body map.
//!
//! Unknown paths get 404. Responses carry `Content-Length`, an `ETag` and
//! `X-Checksum-Sha1` when the test registered one.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub body: Vec<u8>,
    pub sha1: Option<String>,
}

/// Handle to a running server. Contents can be inspected and changed while it runs.
#[derive(Clone)]
pub struct HttpServer {
    base: String,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl HttpServer {
    /// Starts a server in a background thread. Runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let entries: Arc<Mutex<HashMap<String, Entry>>> = Arc::default();
        let shared = Arc::clone(&entries);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let entries = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &entries));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}/", port),
            entries,
        }
    }

    /// Absolute URL for `path` (no leading slash).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn insert(&self, path: &str, body: &[u8], sha1: Option<&str>) {
        self.entries.lock().unwrap().insert(
            format!("/{path}"),
            Entry {
                body: body.to_vec(),
                sha1: sha1.map(str::to_string),
            },
        );
    }

    pub fn body(&self, path: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(&format!("/{path}"))
            .map(|e| e.body.clone())
    }
}

struct Request {
    method: String,
    path: String,
    content_length: usize,
    expect_continue: bool,
    /// Body bytes that arrived with the headers.
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };
    let head = std::str::from_utf8(&data[..header_end]).ok()?;
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let mut content_length = 0;
    let mut expect_continue = false;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("expect") {
                expect_continue = value.trim().eq_ignore_ascii_case("100-continue");
            }
        }
    }
    Some(Request {
        method,
        path,
        content_length,
        expect_continue,
        body: data[header_end + 4..].to_vec(),
    })
}

fn handle(mut stream: TcpStream, entries: &Mutex<HashMap<String, Entry>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(mut request) = read_request(&mut stream) else {
        return;
    };
    let path = request.path.split('?').next().unwrap_or("/").to_string();

    match request.method.as_str() {
        "GET" | "HEAD" => {
            let entry = entries.lock().unwrap().get(&path).cloned();
            let Some(entry) = entry else {
                let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
                return;
            };
            let sha1 = entry
                .sha1
                .as_deref()
                .map(|s| format!("X-Checksum-Sha1: {s}\r\n"))
                .unwrap_or_default();
            let head = format!(
                "HTTP/1.1 200 OK\r\n\
                 Content-Length: {}\r\n\
                 Content-Type: application/octet-stream\r\n\
                 ETag: \"v{}\"\r\n{}\r\n",
                entry.body.len(),
                entry.body.len(),
                sha1
            );
            let _ = stream.write_all(head.as_bytes());
            if request.method == "GET" {
                let _ = stream.write_all(&entry.body);
            }
        }
        "PUT" => {
            if request.expect_continue {
                let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
            }
            let mut buf = [0u8; 8192];
            while request.body.len() < request.content_length {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.body.extend_from_slice(&buf[..n]),
                }
            }
            request.body.truncate(request.content_length);
            entries.lock().unwrap().insert(
                path,
                Entry {
                    body: request.body,
                    sha1: None,
                },
            );
            let _ = stream.write_all(b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n");
        }
        _ => {
            let _ = stream
                .write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        }
    }
}

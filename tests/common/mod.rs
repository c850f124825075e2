//! Shared helpers for CLI tests: an isolated `pixela` command and a local
//! HTTP stub that records every request it receives.

#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

/// `pixela` running in an empty temp dir with no ambient configuration.
pub fn pixela(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pixela").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_PROXY", "*")
        .env_remove("USERNAME")
        .env_remove("TOKEN")
        .env_remove("GRAPH_ID")
        .env_remove("PIXELA_ENDPOINT")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("HTTPS_PROXY")
        .env_remove("https_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    cmd
}

/// `pixela` with credentials for `alice` pointed at `stub`.
pub fn pixela_for(home: &TempDir, stub: &StubServer) -> Command {
    let mut cmd = pixela(home);
    cmd.env("USERNAME", "alice")
        .env("TOKEN", "secret123")
        .env("GRAPH_ID", "coding")
        .env("PIXELA_ENDPOINT", stub.endpoint());
    cmd
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Answers every request with the same canned response.
pub struct StubServer {
    addr: String,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl StubServer {
    pub fn start(status_line: &str, body: &str) -> Self {
        Self::start_raw(format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        ))
    }

    /// Answer with `response` byte for byte, status line and headers included.
    pub fn start_raw(response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            loop {
                match listener.accept() {
                    Ok((stream, _)) => seen.push(handle_conn(stream, &response)),
                    Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        if stop_flag.load(Ordering::SeqCst) {
                            break;
                        }
                        thread::sleep(Duration::from_millis(10));
                    }
                    Err(e) => panic!("stub accept failed: {e}"),
                }
            }
            seen
        });

        StubServer { addr, stop, handle }
    }

    pub fn ok() -> Self {
        Self::start("200 OK", r#"{"message":"Success.","isSuccess":true}"#)
    }

    /// Value for `PIXELA_ENDPOINT`.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/users", self.addr)
    }

    /// Stop the stub and return what it received. Call after the command exits.
    pub fn requests(self) -> Vec<RecordedRequest> {
        self.stop.store(true, Ordering::SeqCst);
        self.handle.join().unwrap()
    }
}

fn handle_conn(mut stream: TcpStream, response: &str) -> RecordedRequest {
    stream.set_nonblocking(false).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map(|(_, v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }
    let req_body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();

    RecordedRequest {
        method,
        path,
        headers,
        body: req_body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

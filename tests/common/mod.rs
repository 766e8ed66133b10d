#![allow(dead_code)]

use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;

const READ_TIMEOUT: Duration = Duration::from_millis(500);
const MAX_READ_DURATION: Duration = Duration::from_secs(6);
const MAX_HEADER_BYTES: usize = 64 * 1024;

pub const AUTHZ_PROFILE_PATH: &str = "/ers/config/authorizationprofile";

pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

/// Serve `responses` in order, one connection each, then stop listening.
/// Returns the base URL of the authorization profile resource.
pub async fn serve_sequence(
    responses: Vec<String>,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let req = read_request(&mut stream).await;
            let _ = tx.send(req);
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}{}", addr, AUTHZ_PROFILE_PATH), rx)
}

pub fn json_response(status: &str, body: &str) -> String {
    response_with_body(status, "application/json", body)
}

pub fn response_with_body(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<CapturedRequest>) -> Vec<CapturedRequest> {
    let mut out = Vec::new();
    while let Ok(req) = rx.try_recv() {
        out.push(req);
    }
    out
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let deadline = Instant::now() + MAX_READ_DURATION;

    let header_end = loop {
        if buf.len() >= MAX_HEADER_BYTES {
            panic!("request headers too large");
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            panic!("timed out reading request headers");
        }
        let read = match timeout(remaining.min(READ_TIMEOUT), stream.read(&mut chunk)).await {
            Ok(Ok(read)) => read,
            Ok(Err(e)) => panic!("read_request I/O error: {e}"),
            Err(_) => continue,
        };
        if read == 0 {
            panic!("connection closed before headers were complete");
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let header_str = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = header_str.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut headers = Vec::new();
    let mut content_length: usize = 0;
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("Content-Length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name.to_string(), value.to_string()));
        }
    }

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            panic!("timed out reading request body");
        }
        let read = match timeout(remaining.min(READ_TIMEOUT), stream.read(&mut chunk)).await {
            Ok(Ok(read)) => read,
            Ok(Err(e)) => panic!("read_request body I/O error: {e}"),
            Err(_) => continue,
        };
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

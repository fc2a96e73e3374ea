use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Minimal HTTP/1.1 fixture answering on a few fixed routes:
///
/// - `/ok`: 200 with body `OK`
/// - `/missing`: 404 with body `nope`
/// - `/redirect/<n>`: 302 to `/redirect/<n-1>`, `/redirect/0` answers 200 `landed`
/// - `/echo`: 200 echoing the request body
/// - `/header`: 200 echoing the `X-Spotter-Check` request header, 400 without it
/// - `/truncated`: announces 10 body bytes, sends 3, then closes
pub(crate) struct TestServer {
    pub(crate) base_url: String,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

impl TestServer {
    pub(crate) fn spawn() -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        thread::spawn(move || handle_client(stream));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn handle_client(mut stream: TcpStream) {
    drop(stream.set_nonblocking(false));
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let response = route(&request);
    if stream.write_all(&response).is_err() {
        return;
    }
    drop(stream.flush());
    drop(stream.shutdown(Shutdown::Both));
}

struct ReceivedRequest {
    path: String,
    head: String,
    body: Vec<u8>,
}

impl ReceivedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.head
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
    }
}

fn route(request: &ReceivedRequest) -> Vec<u8> {
    let path = request.path.as_str();
    if path == "/ok" {
        return response("200 OK", &[], b"OK");
    }
    if path == "/echo" {
        return response("200 OK", &[], &request.body);
    }
    if path == "/header" {
        return match request.header("x-spotter-check") {
            Some(value) => response("200 OK", &[], value.as_bytes()),
            None => response("400 Bad Request", &[], b"no header"),
        };
    }
    if path == "/truncated" {
        return b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\nConnection: close\r\n\r\nabc".to_vec();
    }
    if let Some(remaining) = path.strip_prefix("/redirect/") {
        let hops: u32 = remaining.parse().unwrap_or(0);
        if hops == 0 {
            return response("200 OK", &[], b"landed");
        }
        let location = format!("Location: /redirect/{}", hops.saturating_sub(1));
        return response("302 Found", &[location.as_str()], b"moved");
    }
    response("404 Not Found", &[], b"nope")
}

fn response(status: &str, headers: &[&str], body: &[u8]) -> Vec<u8> {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        body.len()
    );
    for header in headers {
        head.push_str(header);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let mut bytes = head.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

fn read_request(stream: &mut TcpStream) -> Option<ReceivedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(chunk.get(..read)?);
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..header_end)?).into_owned();
    let path = head
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)?
        .to_owned();
    let mut request = ReceivedRequest {
        path,
        head,
        body: Vec::new(),
    };
    let content_length = request
        .header("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end.saturating_add(4);
    let mut body = buffer.get(body_start..).map(<[u8]>::to_vec).unwrap_or_default();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }
    request.body = body;
    Some(request)
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

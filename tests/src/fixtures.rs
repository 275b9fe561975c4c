//! Shared test fixtures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::Coordinate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Two facilities one degree apart on the equator.
pub const TWO_FACILITIES: &str = "\
name,address,phone,latitude,longitude
A,1 Zero Rd,+911000000,0.0,0.0
B,2 One Rd,+912000000,0.0,1.0
";

/// Same two facilities plus a third near the antimeridian.
pub const THREE_FACILITIES: &str = "\
name,address,phone,latitude,longitude
A,1 Zero Rd,+911000000,0.0,0.0
B,2 One Rd,+912000000,0.0,1.0
C,3 Far Rd,+913000000,0.0,179.9
";

pub fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

#[derive(Default)]
struct RelayState {
    received: Mutex<Vec<(String, String)>>,
    rejected: Mutex<HashSet<String>>,
    counter: AtomicUsize,
}

/// Local stand-in for the HTTP SMS relay.
///
/// Accepts `POST {to, body}` and answers `{success, sid}` or
/// `{success: false, error}` for rejected numbers.
pub struct FakeRelay {
    pub url: String,
    state: Arc<RelayState>,
}

impl FakeRelay {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(RelayState::default());

        let server_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(handle(socket, Arc::clone(&server_state)));
            }
        });

        Self {
            url: format!("http://{addr}/send-sms"),
            state,
        }
    }

    pub fn reject(&self, number: &str) {
        self.state.rejected.lock().insert(number.to_string());
    }

    pub fn accept(&self, number: &str) {
        self.state.rejected.lock().remove(number);
    }

    /// `(to, body)` of every request, rejected ones included.
    pub fn received(&self) -> Vec<(String, String)> {
        self.state.received.lock().clone()
    }
}

async fn handle(mut socket: TcpStream, state: Arc<RelayState>) {
    let body = read_body(&mut socket).await;
    let request: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let to = request["to"].as_str().unwrap_or_default().to_string();
    let text = request["body"].as_str().unwrap_or_default().to_string();
    state.received.lock().push((to.clone(), text));

    let reply = if state.rejected.lock().contains(&to) {
        serde_json::json!({ "success": false, "error": "number blocked" })
    } else {
        let n = state.counter.fetch_add(1, Ordering::SeqCst);
        serde_json::json!({ "success": true, "sid": format!("SM{n}") })
    }
    .to_string();

    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{reply}",
        reply.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(split) = text.find("\r\n\r\n") {
            let length = text[..split]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let body = &text[split + 4..];
            if body.len() >= length || n == 0 {
                return body.to_string();
            }
        }
        if n == 0 {
            return String::new();
        }
    }
}

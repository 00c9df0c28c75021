//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves static bodies keyed by request path. Unknown paths get 404; paths
//! registered as slow stall before answering so client timeouts can be
//! exercised. Every GET is counted per path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct Routes {
    bodies: HashMap<String, Vec<u8>>,
    slow: HashMap<String, Duration>,
    hits: Mutex<HashMap<String, usize>>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct ImageServer {
    base: String,
    routes: Arc<Routes>,
}

impl ImageServer {
    /// Absolute URL for `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of GET requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        *self.routes.hits.lock().unwrap().get(path).unwrap_or(&0)
    }
}

#[derive(Default)]
pub struct ImageServerBuilder {
    routes: Routes,
}

impl ImageServerBuilder {
    pub fn body(mut self, path: &str, body: &[u8]) -> Self {
        self.routes.bodies.insert(path.to_string(), body.to_vec());
        self
    }

    pub fn slow(mut self, path: &str, delay: Duration) -> Self {
        self.routes.slow.insert(path.to_string(), delay);
        self
    }

    pub fn start(self) -> ImageServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.routes);
        let server_routes = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&server_routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        ImageServer {
            base: format!("http://127.0.0.1:{}", port),
            routes,
        }
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &Routes) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/").to_string();

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    *routes.hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    if let Some(delay) = routes.slow.get(&path) {
        thread::sleep(*delay);
    }

    match routes.bodies.get(&path) {
        Some(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

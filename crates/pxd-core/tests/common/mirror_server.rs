//! Minimal HTTP/1.1 mirror for integration tests.
//!
//! Serves a fixed set of paths. HEAD answers with the configured status and
//! Content-Type; GET also sends the body. Unknown paths get 404 text/html.
//! Every GET is counted so tests can assert on network transfers.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Resource {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Handle to a running mirror.
pub struct Mirror {
    pub base: String,
    gets: Arc<AtomicUsize>,
    heads: Arc<AtomicUsize>,
}

impl Mirror {
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `resources` keyed by path
/// (without leading slash). The server runs until the process exits.
pub fn start(resources: &[(&str, &str, &[u8])]) -> Mirror {
    let map: HashMap<String, Resource> = resources
        .iter()
        .map(|(path, ct, body)| {
            (
                path.to_string(),
                Resource {
                    content_type: ct.to_string(),
                    body: body.to_vec(),
                },
            )
        })
        .collect();
    let map = Arc::new(map);
    let gets = Arc::new(AtomicUsize::new(0));
    let heads = Arc::new(AtomicUsize::new(0));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    {
        let gets = Arc::clone(&gets);
        let heads = Arc::clone(&heads);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let map = Arc::clone(&map);
                let gets = Arc::clone(&gets);
                let heads = Arc::clone(&heads);
                thread::spawn(move || handle(stream, &map, &gets, &heads));
            }
        });
    }
    Mirror {
        base: format!("http://127.0.0.1:{}", port),
        gets,
        heads,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    map: &HashMap<String, Resource>,
    gets: &AtomicUsize,
    heads: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let path = parts.next().unwrap_or("/").trim_start_matches('/');

    let is_head = method.eq_ignore_ascii_case("HEAD");
    if is_head {
        heads.fetch_add(1, Ordering::SeqCst);
    } else if method.eq_ignore_ascii_case("GET") {
        gets.fetch_add(1, Ordering::SeqCst);
    } else {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    let not_found = Resource {
        content_type: "text/html".to_string(),
        body: b"<html>not found</html>".to_vec(),
    };
    let (status, resource) = match map.get(path) {
        Some(r) => ("200 OK", r),
        None => ("404 Not Found", &not_found),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        resource.content_type,
        resource.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    if !is_head {
        let _ = stream.write_all(&resource.body);
    }
}

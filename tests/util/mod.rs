//! Shared helpers for integration tests: a canned HTTP backend and a `nova`
//! command isolated from the developer's config and environment.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;

/// Canned response for one exact request path.
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(path: &'static str, body: serde_json::Value) -> Self {
        Self {
            path,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            body: r#"{"detail":"error"}"#.to_string(),
        }
    }
}

/// Minimal HTTP/1.1 server answering GETs from a fixed route table and
/// recording each request target (path plus query string).
pub struct MockBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Ok(read_half) = stream.try_clone() else { continue };
                let mut reader = BufReader::new(read_half);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();
                let path = target.split('?').next().unwrap_or("/").to_string();
                log.lock().unwrap().push(target);

                let (status, body) = routes
                    .iter()
                    .find(|r| r.path == path)
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Base URL with nothing listening behind it.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// `nova` with config and data dirs pointed at `home` and NOVA_* unset.
pub fn nova(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nova"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("RUST_LOG", "warn")
        .env_remove("TUI_HEADLESS");
    for var in [
        "NOVA_CONFIG",
        "NOVA_API_BASE_URL",
        "NOVA_EMBEDDING_TYPE",
        "NOVA_AI_VALIDATION",
        "NOVA_RESPONSE_ORDERING",
        "NOVA_SEARCH_LIMIT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn sample_results() -> serde_json::Value {
    serde_json::json!([
        {"id": 42, "pregunta": "¿Cómo restablezco mi contraseña?", "grupo": "Cuentas", "tema": "Acceso"},
        {"id": "43", "score": 0.71, "pregunta": "¿Cómo cierro mi cuenta?", "grupo": "Cuentas", "tema": "Baja"}
    ])
}

pub fn sample_article() -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "pregunta": "¿Cómo restablezco mi contraseña?",
        "grupo": "Cuentas",
        "tema": "Acceso",
        "respuesta": "<p>Abra <b>Configuración</b>.</p><ul><li>Pulse Restablecer</li></ul>"
    })
}

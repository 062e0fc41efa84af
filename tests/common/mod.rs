//! Local stand-in for the REST Countries API, served by `tiny_http`.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

pub const FRANCE: &str = r#"{
    "name": {"common": "France", "official": "French Republic"},
    "capital": ["Paris"],
    "region": "Europe",
    "subregion": "Western Europe",
    "population": 67391582,
    "languages": {"fra": "French"},
    "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
    "flags": {"png": "https://flagcdn.com/w320/fr.png", "alt": "The flag of France is composed of three equal vertical bands of blue, white and red."}
}"#;

pub const UNITED_STATES: &str = r#"{
    "name": {"common": "United States", "official": "United States of America"},
    "capital": ["Washington, D.C."],
    "region": "Americas",
    "subregion": "North America",
    "population": 329484123,
    "languages": {"eng": "English"},
    "currencies": {"USD": {"name": "United States dollar", "symbol": "$"}},
    "flags": {"png": "https://flagcdn.com/w320/us.png"}
}"#;

pub const ANTARCTICA: &str = r#"{
    "name": {"common": "Antarctica", "official": "Antarctica"},
    "region": "Antarctic",
    "population": 1000,
    "flags": {"png": "https://flagcdn.com/w320/aq.png"}
}"#;

/// A running fake API. Requests are counted and their URLs recorded.
pub struct FakeApi {
    pub base: String,
    pub hits: Arc<AtomicUsize>,
    pub urls: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn body_for(name: &str) -> (u16, String) {
    match name {
        "France" => (200, format!("[{FRANCE}]")),
        "United States" => (200, format!("[{UNITED_STATES}]")),
        "Antarctica" => (200, format!("[{ANTARCTICA}]")),
        "Nowhere" => (200, "[]".to_string()),
        "Broken" => (500, "internal error".to_string()),
        _ => (404, r#"{"status":404,"message":"Not Found"}"#.to_string()),
    }
}

/// Serve on an ephemeral port until the test process exits.
pub fn start() -> FakeApi {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let urls = Arc::new(Mutex::new(Vec::new()));

    let (h, u) = (Arc::clone(&hits), Arc::clone(&urls));
    thread::spawn(move || {
        for request in server.incoming_requests() {
            h.fetch_add(1, Ordering::SeqCst);
            let url = request.url().to_string();
            u.lock().unwrap().push(url.clone());

            let (code, body) = match url
                .strip_prefix("/v3.1/name/")
                .and_then(|rest| rest.strip_suffix("?fullText=true"))
            {
                Some(raw) => {
                    let name = percent_encoding::percent_decode_str(raw).decode_utf8_lossy();
                    body_for(&name)
                }
                None => (400, "bad request".to_string()),
            };
            let response = tiny_http::Response::from_string(body)
                .with_status_code(code)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
            let _ = request.respond(response);
        }
    });

    FakeApi {
        base: format!("http://127.0.0.1:{port}/v3.1"),
        hits,
        urls,
    }
}

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use reqwest::Method;
use tokio::net::TcpListener;

use studyshare_client::config::{ApiConfig, RetryPolicy};
use studyshare_client::error::ApiError;
use studyshare_client::http::{ApiClient, ApiRequest, ApiResponse, Transport};

/// Serve a router on an ephemeral local port and hand back its address.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    addr
}

/// A canned response matched by method plus a URL fragment.
pub struct Route {
    method: Method,
    fragment: &'static str,
    status: u16,
    body: String,
    delay: Duration,
}

impl Route {
    pub fn get(fragment: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method: Method::GET,
            fragment,
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn post(fragment: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            fragment,
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Fake transport scripted with canned routes. Unmatched requests fail like
/// a refused connection, which the retry policy treats as non-transient.
pub struct ScriptedTransport {
    routes: Vec<Route>,
    log: Mutex<Vec<(String, Option<serde_json::Value>)>>,
}

impl ScriptedTransport {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn bodies(&self) -> Vec<Option<serde_json::Value>> {
        self.log.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }

    pub fn hits(&self, fragment: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(url, _)| url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.log
            .lock()
            .unwrap()
            .push((request.url.clone(), request.body.clone()));

        for route in &self.routes {
            if route.method == request.method && request.url.contains(route.fragment) {
                if !route.delay.is_zero() {
                    tokio::time::sleep(route.delay).await;
                }
                return Ok(ApiResponse {
                    status: route.status,
                    body: route.body.clone(),
                });
            }
        }
        Err(ApiError::Network("connection refused".to_string()))
    }
}

/// Default config with millisecond retry delays so tests stay fast.
pub fn fast_config() -> ApiConfig {
    ApiConfig {
        retry: RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_millis(1),
            retry_server_errors: true,
        },
        ..ApiConfig::default()
    }
}

pub fn scripted_client(routes: Vec<Route>) -> (Arc<ApiClient>, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new(routes));
    let core = Arc::new(ApiClient::with_transport(fast_config(), transport.clone()));
    (core, transport)
}

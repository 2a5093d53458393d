//! Integration tests for Coinhall.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coinhall-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port over a data file in
//! a fresh temporary directory, then drives it over HTTP with `reqwest`.

#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use coinhall_server::config::ServerConfig;
use coinhall_server::state::AppState;
use coinhall_server::store::Store;

/// Admin secret configured for every test server.
pub const ADMIN_SECRET: &str = "Zq7!pLm2#Rv9@Tx4";

/// Email configured as the operator.
pub const OPERATOR_EMAIL: &str = "operator@coinhall.test";

/// A running server and an HTTP client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub data_file: PathBuf,
    vars: HashMap<String, String>,
    dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server with the default test configuration.
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    /// Start a server, overriding configuration variables.
    pub async fn with_vars(overrides: &[(&str, &str)]) -> Self {
        let (dir, mut vars) = Self::default_vars();
        for (key, value) in overrides {
            vars.insert((*key).to_string(), (*value).to_string());
        }
        Self::start(dir, vars).await
    }

    /// Start a server with no admin secret configured.
    pub async fn without_admin_secret() -> Self {
        let (dir, mut vars) = Self::default_vars();
        vars.remove("COINHALL_ADMIN_SECRET");
        Self::start(dir, vars).await
    }

    fn default_vars() -> (TempDir, HashMap<String, String>) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_file = dir.path().join("database.json");

        let vars = HashMap::from([
            ("COINHALL_PORT".to_string(), "0".to_string()),
            (
                "COINHALL_DATA_FILE".to_string(),
                data_file.display().to_string(),
            ),
            (
                "COINHALL_OPERATOR_EMAIL".to_string(),
                OPERATOR_EMAIL.to_string(),
            ),
            ("COINHALL_ADMIN_SECRET".to_string(), ADMIN_SECRET.to_string()),
        ]);
        (dir, vars)
    }

    async fn start(dir: TempDir, vars: HashMap<String, String>) -> Self {
        let config =
            ServerConfig::from_vars(|key| vars.get(key).cloned()).expect("Invalid test configuration");
        let data_file = config.data_file.clone();

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("Listener has no address");

        let store = Store::load(&config.data_file);
        let app = coinhall_server::app(AppState::new(config, store));
        let server = tokio::spawn(async move {
            axum_serve(listener, app).await;
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            data_file,
            vars,
            dir,
            server,
        }
    }

    /// Stop this server and start a fresh one over the same data file.
    pub async fn restart(self) -> Self {
        self.server.abort();
        // Wait for the listener to be dropped.
        let _ = self.server.await;
        Self::start(self.dir, self.vars).await
    }

    /// POST a JSON body and return the JSON reply.
    pub async fn post(&self, path: &str, body: &Value) -> Value {
        self.client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
            .json()
            .await
            .expect("Response was not JSON")
    }

    /// GET and return the JSON reply.
    pub async fn get_json(&self, path: &str) -> Value {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Request failed")
            .json()
            .await
            .expect("Response was not JSON")
    }

    /// The data file as written by the server.
    pub fn data_file_json(&self) -> Value {
        let text = std::fs::read_to_string(&self.data_file).expect("Data file missing");
        serde_json::from_str(&text).expect("Data file is not JSON")
    }

    /// Register `email` through `/get-balance` and credit it through `/admin/money`.
    pub async fn funded_user(&self, email: &str, amount: i64) {
        self.post("/get-balance", &serde_json::json!({ "email": email }))
            .await;
        let reply = self
            .post(
                "/admin/money",
                &serde_json::json!({ "email": email, "amount": amount }),
            )
            .await;
        assert_eq!(reply["success"], true, "funding {email} failed");
    }
}

async fn axum_serve(listener: tokio::net::TcpListener, app: axum::Router) {
    if let Err(e) = axum::serve(listener, app).await {
        panic!("Test server failed: {e}");
    }
}

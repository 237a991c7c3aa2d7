//! Proxy pool with per-request rotation

use std::path::Path;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;

use crate::error::{Result, UserScoutError};

/// A pool of HTTP clients, one per configured proxy, handed out
/// round-robin. reqwest binds a proxy to a client, so rotation means
/// rotating clients rather than rewriting requests.
///
/// No fairness or health tracking; a dead proxy surfaces as probe errors
/// for the requests it was handed.
#[derive(Debug)]
pub struct ProxyPool {
    clients: Vec<Client>,
    cursor: Mutex<usize>,
}

impl ProxyPool {
    /// Load proxies from a file of `host:port` or `scheme://host:port`
    /// lines. Blank lines and `#` comments are skipped; lines without a
    /// scheme get `http://`.
    pub fn load(path: &Path, timeout: Duration, user_agent: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            UserScoutError::io(
                format!("failed to read proxy file: {e}"),
                Some(path.display().to_string()),
            )
        })?;

        let mut clients = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let url = if line.contains("://") {
                line.to_string()
            } else {
                format!("http://{line}")
            };

            let proxy = reqwest::Proxy::all(&url).map_err(|e| {
                UserScoutError::config(format!("invalid proxy '{line}': {e}"))
            })?;
            let client = Client::builder()
                .proxy(proxy)
                .timeout(timeout)
                .user_agent(user_agent)
                .build()
                .map_err(|e| {
                    UserScoutError::config(format!(
                        "failed to build client for proxy '{line}': {e}"
                    ))
                })?;
            clients.push(client);
        }

        if clients.is_empty() {
            return Err(UserScoutError::config(format!(
                "proxy file '{}' contains no proxies",
                path.display()
            )));
        }

        tracing::info!(proxies = clients.len(), "Loaded proxy pool");

        Ok(Self {
            clients,
            cursor: Mutex::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Next client in rotation. Clients are cheap to clone (shared pool).
    pub fn next_client(&self) -> Client {
        let mut cursor = self.cursor.lock();
        let client = self.clients[*cursor].clone();
        *cursor = (*cursor + 1) % self.clients.len();
        client
    }
}

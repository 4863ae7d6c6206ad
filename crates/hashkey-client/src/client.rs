//! Two-stage key loading: ask the server, otherwise generate locally.

use std::fmt;
use std::time::Duration;

use hashkey::{KeyGenerator, KeySet, parse};
use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the key server, without a trailing slash.
    pub endpoint: String,
    /// Upper bound for the whole remote request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Where a loaded key set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote => f.write_str("remote"),
            Source::Local => f.write_str("local"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub set: KeySet,
    pub source: Source,
}

/// Server response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<KeySet>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct KeyClient {
    http: reqwest::Client,
    config: ClientConfig,
    generator: KeyGenerator,
}

impl KeyClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            generator: KeyGenerator::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the random endpoint, or of the batch endpoint for `batch`.
    /// The batch id is percent-encoded as a single path segment.
    pub fn url(&self, batch: Option<&str>) -> Result<Url> {
        let endpoint = &self.config.endpoint;
        let mut url = Url::parse(endpoint)
            .map_err(|e| ClientError::Endpoint(format!("{endpoint}: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Endpoint(format!("{endpoint}: not a base URL")))?;
            segments.pop_if_empty().push("api");
            match batch {
                Some(id) => segments.push("batch").push(id),
                None => segments.push("keys"),
            };
        }
        Ok(url)
    }

    /// Fetch a key set from the server and check its shape.
    pub async fn fetch_remote(&self, batch: Option<&str>) -> Result<KeySet> {
        let response = self
            .http
            .get(self.url(batch)?)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let envelope: Envelope = response.json().await.map_err(classify)?;
        if !envelope.success {
            let reason = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(ClientError::Rejected(reason));
        }
        let set = envelope
            .data
            .ok_or_else(|| ClientError::Rejected("response carried no key set".to_string()))?;

        validate(&set)?;
        if let Some(id) = batch.filter(|id| *id != set.batch_id) {
            return Err(ClientError::Rejected(format!(
                "asked for batch {id:?}, got {:?}",
                set.batch_id
            )));
        }
        Ok(set)
    }

    /// Load keys from the server, or generate them locally if that fails.
    /// A remote failure is only logged when the local path succeeds.
    pub async fn load(&self, batch: Option<&str>) -> hashkey::Result<Loaded> {
        match self.fetch_remote(batch).await {
            Ok(set) => {
                log::info!("Keys loaded from {}", self.config.endpoint);
                Ok(Loaded {
                    set,
                    source: Source::Remote,
                })
            }
            Err(e) => {
                log::info!("Key server unavailable ({}), generating keys locally", e);
                let set = self.generator.generate_local_set()?;
                Ok(Loaded {
                    set,
                    source: Source::Local,
                })
            }
        }
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(e)
    }
}

fn validate(set: &KeySet) -> Result<()> {
    if !set.is_consistent() {
        return Err(ClientError::Rejected(
            "key types do not match their groups".to_string(),
        ));
    }
    for record in set.records() {
        let parsed = parse(&record.key)?;
        if parsed.key_type != record.key_type {
            return Err(ClientError::Rejected(format!(
                "key {} is tagged {} but listed as {}",
                record.key,
                parsed.key_type.suffix(),
                record.key_type.suffix()
            )));
        }
    }
    Ok(())
}

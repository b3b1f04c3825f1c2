use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11367";
pub const DEFAULT_SCAN_LIMIT: usize = 1000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TTL reported for keys that never expire
pub const TTL_PERSISTENT: i64 = -1;
/// TTL reported for keys that do not exist
pub const TTL_MISSING: i64 = -2;

/// Current wall clock time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyType {
    String,
    Hash,
    List,
    Set,
    ZSet,
    Stream,
    #[default]
    Unknown,
}

impl KeyType {
    /// Every concrete type, in the order the type filter cycles through them
    pub const ALL: [KeyType; 6] = [
        KeyType::String,
        KeyType::Hash,
        KeyType::List,
        KeyType::Set,
        KeyType::ZSet,
        KeyType::Stream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Hash => "hash",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::ZSet => "zset",
            KeyType::Stream => "stream",
            KeyType::Unknown => "unknown",
        }
    }

    /// Short badge shown in the key table
    pub fn badge(&self) -> &'static str {
        match self {
            KeyType::String => "STR",
            KeyType::Hash => "HASH",
            KeyType::List => "LIST",
            KeyType::Set => "SET",
            KeyType::ZSet => "ZSET",
            KeyType::Stream => "STRM",
            KeyType::Unknown => "?",
        }
    }
}

impl From<&str> for KeyType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "string" => KeyType::String,
            "hash" => KeyType::Hash,
            "list" => KeyType::List,
            "set" => KeyType::Set,
            "zset" => KeyType::ZSet,
            "stream" => KeyType::Stream,
            _ => KeyType::Unknown,
        }
    }
}

impl From<String> for KeyType {
    fn from(value: String) -> Self {
        KeyType::from(value.as_str())
    }
}

impl From<KeyType> for String {
    fn from(value: KeyType) -> Self {
        value.as_str().to_string()
    }
}

fn default_ttl() -> i64 {
    TTL_PERSISTENT
}

/// One key of the inventory as reported by the key API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub key_type: KeyType,
    /// -1 never expires, -2 missing, otherwise seconds left at fetch time
    #[serde(rename = "ttl", default = "default_ttl")]
    pub ttl_seconds: i64,
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
    #[serde(skip)]
    pub selected: bool,
    #[serde(skip)]
    pub fetched_at_ms: i64,
}

impl KeyRecord {
    pub fn new(name: impl Into<String>, key_type: KeyType, ttl_seconds: i64, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            key_type,
            ttl_seconds,
            size_bytes,
            selected: false,
            fetched_at_ms: 0,
        }
    }
}

/// Full key details including the stored value
#[derive(Debug, Clone, Deserialize)]
pub struct KeyInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub key_type: KeyType,
    #[serde(default = "default_ttl")]
    pub ttl: i64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn into_data(self, endpoint: &str) -> Result<T> {
        match self.data {
            Some(data) => Ok(data),
            None => anyhow::bail!(
                "Malformed response from {}: missing data field{}",
                endpoint,
                self.message.map(|m| format!(" ({})", m)).unwrap_or_default()
            ),
        }
    }
}

/// Non-2xx reply from the key API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatusError {
    pub status: u16,
    pub message: String,
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiStatusError {}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build the error for a non-2xx response, preferring the body's message
pub fn status_error(status: StatusCode, body: &str) -> ApiStatusError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });

    ApiStatusError {
        status: status.as_u16(),
        message,
    }
}

pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiEnvelope<T>> {
    serde_json::from_str(body).context("Malformed response body")
}

/// Merge a name listing with its batch info reply, keeping listing order.
/// Names the info reply does not mention are reported as missing.
pub fn assemble_records(names: Vec<String>, infos: Vec<KeyRecord>, fetched_at_ms: i64) -> Vec<KeyRecord> {
    let mut by_name: HashMap<String, KeyRecord> = infos
        .into_iter()
        .map(|info| (info.name.clone(), info))
        .collect();

    names
        .into_iter()
        .map(|name| {
            let mut record = by_name
                .remove(&name)
                .unwrap_or_else(|| KeyRecord::new(name, KeyType::Unknown, TTL_MISSING, 0));
            record.selected = false;
            record.fetched_at_ms = fetched_at_ms;
            record
        })
        .collect()
}

#[derive(Clone)]
pub struct KeyApiClient {
    base_url: String,
    token: Option<String>,
    connection_id: Option<String>,
    client: Client,
}

impl KeyApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            connection_id: None,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token (and optional connection id) sent with every request
    pub fn set_auth(&mut self, token: impl Into<String>, connection_id: Option<String>) {
        self.token = Some(token.into());
        self.connection_id = connection_id;
    }

    pub fn clear_auth(&mut self) {
        self.token = None;
        self.connection_id = None;
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiEnvelope<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.request(method.clone(), &url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(connection_id) = &self.connection_id {
            request = request.header("X-Connection-ID", connection_id);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, endpoint))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", endpoint))?;

        if !status.is_success() {
            tracing::debug!(endpoint, status = status.as_u16(), "key API returned error status");
            return Err(status_error(status, &text).into());
        }

        parse_envelope(&text).with_context(|| format!("Malformed response from {}", endpoint))
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: serde_json::Value) -> Result<ApiEnvelope<T>> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    /// Health check of the proxy service
    pub async fn ping(&self) -> Result<()> {
        self.request::<serde_json::Value>(Method::GET, "/ping", None)
            .await
            .map(|_| ())
    }

    pub async fn list_key_names(&self, pattern: &str, limit: usize) -> Result<Vec<String>> {
        let mut params = Vec::new();
        if pattern != "*" && !pattern.is_empty() {
            params.push(format!("pattern={}", urlencoding::encode(pattern)));
        }
        if limit != DEFAULT_SCAN_LIMIT {
            params.push(format!("limit={}", limit));
        }

        let endpoint = if params.is_empty() {
            "/api/redis/keys".to_string()
        } else {
            format!("/api/redis/keys?{}", params.join("&"))
        };

        let envelope: ApiEnvelope<Vec<String>> = self.request(Method::GET, &endpoint, None).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn keys_info(&self, names: &[String]) -> Result<Vec<KeyRecord>> {
        let endpoint = "/api/redis/keys/info";
        self.post(endpoint, json!({ "keys": names }))
            .await?
            .into_data(endpoint)
    }

    /// Fetch the inventory: name listing plus one batch info call
    pub async fn list_keys(&self, pattern: &str, limit: usize) -> Result<Vec<KeyRecord>> {
        let names = self.list_key_names(pattern, limit).await?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let infos = self.keys_info(&names).await?;
        Ok(assemble_records(names, infos, now_ms()))
    }

    pub async fn get_type(&self, key: &str) -> Result<KeyType> {
        let endpoint = "/api/redis/type";
        let raw: String = self.post(endpoint, json!({ "key": key })).await?.into_data(endpoint)?;
        Ok(KeyType::from(raw))
    }

    pub async fn get_ttl(&self, key: &str) -> Result<i64> {
        let endpoint = "/api/redis/ttl";
        self.post(endpoint, json!({ "key": key })).await?.into_data(endpoint)
    }

    pub async fn get_size(&self, key: &str) -> Result<u64> {
        let endpoint = "/api/redis/memory";
        self.post(endpoint, json!({ "key": key })).await?.into_data(endpoint)
    }

    /// Type, TTL, size and value of a single key
    pub async fn get_key_info(&self, key: &str) -> Result<KeyInfo> {
        let endpoint = format!("/api/redis/key/{}", urlencoding::encode(key));
        self.request(Method::GET, &endpoint, None)
            .await?
            .into_data(&endpoint)
    }

    /// Returns the number of keys actually deleted
    pub async fn delete_keys(&self, names: &[String]) -> Result<u64> {
        let endpoint = "/api/redis/del";
        self.request(Method::DELETE, endpoint, Some(json!({ "keys": names })))
            .await?
            .into_data(endpoint)
    }

    pub async fn rename_key(&self, old_name: &str, new_name: &str) -> Result<bool> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .post("/api/redis/rename", json!({ "oldKey": old_name, "newKey": new_name }))
            .await?;
        Ok(envelope.success.unwrap_or(false))
    }

    pub async fn set_ttl(&self, key: &str, seconds: i64) -> Result<bool> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .post("/api/redis/expire", json!({ "key": key, "seconds": seconds }))
            .await?;
        Ok(envelope.success.unwrap_or(false))
    }

    /// Remove the expiry of a key
    pub async fn persist_key(&self, key: &str) -> Result<bool> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .post("/api/redis/persist", json!({ "key": key }))
            .await?;
        Ok(envelope.success.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_from_server_strings() {
        assert_eq!(KeyType::from("string"), KeyType::String);
        assert_eq!(KeyType::from("ZSET"), KeyType::ZSet);
        assert_eq!(KeyType::from("ReJSON-RL"), KeyType::Unknown);
        assert_eq!(KeyType::from(""), KeyType::Unknown);
    }

    #[test]
    fn test_key_record_deserializes_server_fields() {
        let body = r#"{"name":"user:1","type":"hash","ttl":30,"size":128}"#;
        let record: KeyRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.name, "user:1");
        assert_eq!(record.key_type, KeyType::Hash);
        assert_eq!(record.ttl_seconds, 30);
        assert_eq!(record.size_bytes, 128);
        assert!(!record.selected);
    }

    #[test]
    fn test_key_record_defaults_missing_fields() {
        let record: KeyRecord = serde_json::from_str(r#"{"name":"k","type":"json"}"#).unwrap();
        assert_eq!(record.key_type, KeyType::Unknown);
        assert_eq!(record.ttl_seconds, TTL_PERSISTENT);
        assert_eq!(record.size_bytes, 0);
    }

    #[test]
    fn test_parse_envelope_with_data() {
        let envelope: ApiEnvelope<Vec<String>> =
            parse_envelope(r#"{"status":"success","data":["a","b"]}"#).unwrap();
        assert_eq!(envelope.data.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_envelope_rejects_garbage() {
        assert!(parse_envelope::<Vec<String>>("<html>502</html>").is_err());
    }

    #[test]
    fn test_into_data_missing_reports_malformed() {
        let envelope: ApiEnvelope<u64> = parse_envelope(r#"{"message":"nope"}"#).unwrap();
        let err = envelope.into_data("/api/redis/del").unwrap_err();
        assert!(err.to_string().contains("missing data"));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_status_error_prefers_body_message() {
        let err = status_error(StatusCode::UNAUTHORIZED, r#"{"message":"invalid token"}"#);
        assert_eq!(err.status, 401);
        assert_eq!(err.message, "invalid token");
    }

    #[test]
    fn test_status_error_fallback_message() {
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_assemble_records_keeps_listing_order() {
        let names = vec!["b".to_string(), "a".to_string(), "gone".to_string()];
        let infos = vec![
            KeyRecord::new("a", KeyType::String, -1, 10),
            KeyRecord::new("b", KeyType::Hash, 30, 20),
        ];

        let records = assemble_records(names, infos, 1_000);
        let order: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "gone"]);
        assert_eq!(records[2].ttl_seconds, TTL_MISSING);
        assert_eq!(records[2].key_type, KeyType::Unknown);
        assert!(records.iter().all(|r| r.fetched_at_ms == 1_000));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = KeyApiClient::new("http://localhost:11367/".to_string(), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11367");
    }
}

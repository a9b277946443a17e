// file: src/maas/client.rs
// version: 1.0.0
// guid: d40c7b92-6e18-4f5a-a3d6-9c02e85b41f7

//! Async MAAS API 2.0 client with OAuth 1.0 PLAINTEXT signing

use super::models::{BootResource, Machine};
use super::MachineApi;
use crate::auth::ApiKey;
use crate::Result;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::{Alphanumeric, DistString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Pause between connection attempts
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// RFC 3986 unreserved characters stay as-is, everything else is encoded
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Client for a single MAAS region controller
pub struct MaasClient {
    http: reqwest::Client,
    api_base: Url,
    key: ApiKey,
}

impl MaasClient {
    /// Connect to MAAS, probing the API with retries
    ///
    /// Failed attempts are logged and retried after a short pause; once the
    /// attempts are exhausted the error carries checklist-style guidance.
    pub async fn connect(maas_url: &str, key: ApiKey, retries: u32) -> Result<Self> {
        let client = Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .connect_timeout(Duration::from_secs(10))
                .build()?,
            api_base: api_base(maas_url)?,
            key,
        };

        for attempt in 1..=retries {
            match client.probe().await {
                Ok(()) => {
                    debug!("Connected to MAAS at {}", client.api_base);
                    return Ok(client);
                }
                Err(e) => warn!("Connection attempt {} failed: {}", attempt, e),
            }
            if attempt < retries {
                debug!("Retrying in {} seconds...", RETRY_DELAY.as_secs());
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        Err(crate::error::ReimageError::network(
            "Unable to connect to MAAS after several attempts.\n\
             Please check:\n\
             \u{2022} Network or VPN connection\n\
             \u{2022} MAAS server hostname and port\n\
             \u{2022} MAAS service availability",
        ))
    }

    /// Cheap authenticated request to confirm the API is reachable
    async fn probe(&self) -> Result<()> {
        let _: serde_json::Value = self.get("version/").await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn post_op<T: DeserializeOwned>(
        &self,
        path: &str,
        op: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("op", op);
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .form(params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::error::ReimageError::api(
                status.as_u16(),
                body.trim().to_string(),
            ));
        }
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_base.join(path).map_err(|e| {
            crate::error::ReimageError::network(format!("Invalid API path '{}': {}", path, e))
        })
    }

    fn auth_header(&self) -> String {
        let nonce = Alphanumeric.sample_string(&mut rand::thread_rng(), 16);
        oauth_header(&self.key, &nonce, chrono::Utc::now().timestamp())
    }
}

#[async_trait]
impl MachineApi for MaasClient {
    async fn list_machines(&self) -> Result<Vec<Machine>> {
        self.get("machines/").await
    }

    async fn get_machine(&self, system_id: &str) -> Result<Machine> {
        self.get(&format!("machines/{}/", system_id)).await
    }

    async fn deploy(&self, system_id: &str, distro_series: Option<&str>) -> Result<Machine> {
        let mut params = Vec::new();
        if let Some(series) = distro_series {
            params.push(("distro_series", series));
        }
        self.post_op(&format!("machines/{}/", system_id), "deploy", &params)
            .await
    }

    async fn release(&self, system_id: &str) -> Result<Machine> {
        self.post_op(&format!("machines/{}/", system_id), "release", &[])
            .await
    }

    async fn list_boot_resources(&self) -> Result<Vec<BootResource>> {
        self.get("boot-resources/").await
    }
}

/// Build the OAuth 1.0 PLAINTEXT Authorization header MAAS expects
fn oauth_header(key: &ApiKey, nonce: &str, timestamp: i64) -> String {
    format!(
        "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
         oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"&{}\", \
         oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
        pct(&key.consumer_key),
        pct(&key.token_key),
        pct(&key.token_secret),
        nonce,
        timestamp
    )
}

fn pct(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

/// Resolve the API root under the configured MAAS URL
fn api_base(maas_url: &str) -> Result<Url> {
    let mut base = maas_url.trim_end_matches('/').to_string();
    base.push('/');
    let base = Url::parse(&base).map_err(|e| {
        crate::error::ReimageError::config(format!("Invalid MAAS URL '{}': {}", maas_url, e))
    })?;
    base.join("api/2.0/").map_err(|e| {
        crate::error::ReimageError::config(format!("Invalid MAAS URL '{}': {}", maas_url, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> ApiKey {
        ApiKey {
            consumer_key: "consumer".to_string(),
            token_key: "token".to_string(),
            token_secret: "secret".to_string(),
        }
    }

    #[test]
    fn test_api_base_joins_api_root() {
        let base = api_base("http://maas.local:5240/MAAS").unwrap();
        assert_eq!(base.as_str(), "http://maas.local:5240/MAAS/api/2.0/");

        // Trailing slash on the configured URL makes no difference
        let base = api_base("http://maas.local:5240/MAAS/").unwrap();
        assert_eq!(base.as_str(), "http://maas.local:5240/MAAS/api/2.0/");
    }

    #[test]
    fn test_api_base_rejects_garbage() {
        assert!(api_base("not a url").is_err());
    }

    #[test]
    fn test_oauth_header_fields() {
        let header = oauth_header(&test_key(), "abcdef0123456789", 1700000000);
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_signature_method=\"PLAINTEXT\""));
        assert!(header.contains("oauth_consumer_key=\"consumer\""));
        assert!(header.contains("oauth_token=\"token\""));
        assert!(header.contains("oauth_signature=\"&secret\""));
        assert!(header.contains("oauth_nonce=\"abcdef0123456789\""));
        assert!(header.contains("oauth_timestamp=\"1700000000\""));
    }

    #[test]
    fn test_oauth_header_percent_encodes_secret() {
        let key = ApiKey {
            consumer_key: "c/1".to_string(),
            token_key: "t:2".to_string(),
            token_secret: "s+3=".to_string(),
        };
        let header = oauth_header(&key, "nonce", 0);
        assert!(header.contains("oauth_consumer_key=\"c%2F1\""));
        assert!(header.contains("oauth_token=\"t%3A2\""));
        assert!(header.contains("oauth_signature=\"&s%2B3%3D\""));
    }

    #[test]
    fn test_unreserved_characters_survive_encoding() {
        assert_eq!(pct("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(pct("a b"), "a%20b");
    }
}

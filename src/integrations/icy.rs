use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::UpstreamError;

/// Read-only source of wallet data. The resolvers only ever see this
/// trait, so tests can substitute canned payloads for the live API.
#[async_trait]
pub trait WalletSource: Send + Sync {
    /// Runs one delegated query and returns the `data.wallet` subtree,
    /// or `None` when upstream had nothing usable to say.
    async fn fetch_wallet(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Option<Value>, UpstreamError>;
}

/// Client for the icy.tools GraphQL API.
#[derive(Debug, Clone)]
pub struct IcyClient {
    endpoint: String,
    client: Client,
}

impl IcyClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl WalletSource for IcyClient {
    async fn fetch_wallet(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Option<Value>, UpstreamError> {
        tracing::debug!("Delegating wallet query to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: Value = serde_json::from_str(&body)?;
        Ok(extract_wallet(envelope))
    }
}

/// Pulls the `data.wallet` subtree out of the upstream response envelope.
/// An errors-only envelope or a missing subtree reads as `None`, never as
/// a failure; the errors are only worth a log line.
fn extract_wallet(mut envelope: Value) -> Option<Value> {
    if let Some(errors) = envelope.get("errors") {
        tracing::warn!("Upstream returned GraphQL errors: {}", errors);
    }

    match envelope.get_mut("data").and_then(|data| data.get_mut("wallet")) {
        Some(wallet) if !wallet.is_null() => Some(wallet.take()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_wallet_subtree() {
        let envelope = json!({ "data": { "wallet": { "tokens": { "edges": [] } } } });
        let wallet = extract_wallet(envelope).expect("wallet subtree should be present");
        assert_eq!(wallet, json!({ "tokens": { "edges": [] } }));
    }

    #[test]
    fn errors_only_envelope_reads_as_absent() {
        let envelope = json!({ "errors": [{ "message": "wallet not found" }] });
        assert!(extract_wallet(envelope).is_none());
    }

    #[test]
    fn null_wallet_reads_as_absent() {
        assert!(extract_wallet(json!({ "data": { "wallet": null } })).is_none());
        assert!(extract_wallet(json!({ "data": {} })).is_none());
        assert!(extract_wallet(json!({})).is_none());
    }
}

use std::env;

use crate::constants::DEFAULT_UPSTREAM_GRAPHQL_URL;
use crate::schema::SchemaVersion;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Upstream GraphQL API
    pub upstream_graphql_url: String,

    // Published schema revision
    pub schema_version: SchemaVersion,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let schema_version = match env::var("GATEWAY_SCHEMA_VERSION") {
            Ok(raw) => SchemaVersion::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!("Unrecognized GATEWAY_SCHEMA_VERSION: {}", raw)
            })?,
            Err(_) => SchemaVersion::V2,
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            upstream_graphql_url: env::var("UPSTREAM_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_GRAPHQL_URL.to_string()),

            schema_version,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream_graphql_url.trim().is_empty() {
            anyhow::bail!("UPSTREAM_GRAPHQL_URL is empty");
        }

        let parsed = url::Url::parse(&self.upstream_graphql_url)
            .map_err(|e| anyhow::anyhow!("UPSTREAM_GRAPHQL_URL is not a valid URL: {}", e))?;
        if parsed.scheme() != "https" {
            tracing::warn!("Upstream endpoint is not served over HTTPS");
        }

        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}

use thiserror::Error;

/// Failures on the path to the upstream GraphQL API.
///
/// None of these ever reach the caller as a GraphQL error: the resolver
/// logs them and lets the `wallet` field go null instead. They stay
/// separate variants so the logs can tell "upstream down" from "upstream
/// sent garbage".
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("upstream response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

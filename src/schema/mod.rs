// Public GraphQL surface. Two revisions of the schema have shipped; both
// delegate to the same upstream API and share the classification core,
// so the only differences live in the per-revision type definitions.

pub mod v1;
pub mod v2;

use std::fmt;
use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::integrations::WalletSource;

/// Published revisions of the gateway schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Earlier revision: single concrete log type, no pagination.
    V1,
    /// Later revision: polymorphic log interface plus forward pagination.
    V2,
}

impl SchemaVersion {
    pub fn parse(raw: &str) -> Option<SchemaVersion> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Some(SchemaVersion::V1),
            "v2" | "2" => Some(SchemaVersion::V2),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

pub type SchemaV1 = Schema<v1::QueryRoot, EmptyMutation, EmptySubscription>;
pub type SchemaV2 = Schema<v2::QueryRoot, EmptyMutation, EmptySubscription>;

/// The executable schema a deployment serves. Which revision is active
/// is fixed at startup by configuration and never changes afterwards.
#[derive(Clone)]
pub enum GatewaySchema {
    V1(SchemaV1),
    V2(SchemaV2),
}

impl GatewaySchema {
    pub fn build(version: SchemaVersion, source: Arc<dyn WalletSource>) -> GatewaySchema {
        match version {
            SchemaVersion::V1 => GatewaySchema::V1(
                Schema::build(v1::QueryRoot, EmptyMutation, EmptySubscription)
                    .data(source)
                    .finish(),
            ),
            SchemaVersion::V2 => GatewaySchema::V2(
                Schema::build(v2::QueryRoot, EmptyMutation, EmptySubscription)
                    .data(source)
                    .finish(),
            ),
        }
    }

    pub async fn execute(&self, request: async_graphql::Request) -> async_graphql::Response {
        match self {
            GatewaySchema::V1(schema) => schema.execute(request).await,
            GatewaySchema::V2(schema) => schema.execute(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parsing_accepts_both_spellings() {
        assert_eq!(SchemaVersion::parse("v1"), Some(SchemaVersion::V1));
        assert_eq!(SchemaVersion::parse("2"), Some(SchemaVersion::V2));
        assert_eq!(SchemaVersion::parse(" V2 "), Some(SchemaVersion::V2));
        assert_eq!(SchemaVersion::parse("latest"), None);
    }
}

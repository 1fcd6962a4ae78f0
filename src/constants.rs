/// Application constants

// Upstream GraphQL API
pub const DEFAULT_UPSTREAM_GRAPHQL_URL: &str = "https://graphql.icy.tools/graphql";

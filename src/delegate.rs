// Builds the one delegated request that answers a gateway query. The
// documents ask upstream for the union of fields every concrete variant
// can need (inline fragments per type), so classification afterwards
// never has to go back to the network.

use serde_json::{json, Value};

use crate::schema::SchemaVersion;

// v1 surface: no pagination, log `type` is a plain string and the
// transaction carries its own block fields.
const WALLET_TOKENS_V1: &str = r#"
query ($address: String!) {
  wallet(address: $address) {
    tokens {
      edges {
        node {
          ... on ERC721Token {
            tokenId
            name
            contract {
              address
            }
            logs {
              edges {
                node {
                  blockNumber
                  estimatedConfirmedAt
                  ... on MintLog {
                    type
                    transaction { valueInEth blockNumber estimatedConfirmedAt }
                  }
                  ... on TransferLog {
                    type
                    transaction { valueInEth blockNumber estimatedConfirmedAt }
                  }
                  ... on OrderLog {
                    type
                    transaction { valueInEth blockNumber estimatedConfirmedAt }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

// v2 surface: forward pagination plus the log interface discriminant.
const WALLET_TOKENS_V2: &str = r#"
query ($address: String!, $after: String) {
  wallet(address: $address) {
    tokens(after: $after) {
      pageInfo {
        endCursor
        hasNextPage
        hasPreviousPage
        startCursor
      }
      edges {
        node {
          ... on ERC721Token {
            tokenId
            name
            contract {
              address
            }
            logs {
              edges {
                node {
                  blockNumber
                  estimatedConfirmedAt
                  ... on MintLog {
                    transaction { valueInEth }
                    type
                  }
                  ... on TransferLog {
                    transaction { valueInEth }
                    type
                  }
                  ... on OrderLog {
                    transaction { valueInEth }
                    type
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub fn wallet_query(version: SchemaVersion) -> &'static str {
    match version {
        SchemaVersion::V1 => WALLET_TOKENS_V1,
        SchemaVersion::V2 => WALLET_TOKENS_V2,
    }
}

/// Variable bindings for `wallet_query`. The `after` cursor is forwarded
/// verbatim; v1 declares no cursor variable at all.
pub fn wallet_variables(version: SchemaVersion, address: &str, after: Option<&str>) -> Value {
    match version {
        SchemaVersion::V1 => json!({ "address": address }),
        SchemaVersion::V2 => json!({ "address": address, "after": after }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v2_document_requests_every_variant_fragment() {
        let query = wallet_query(SchemaVersion::V2);
        for fragment in ["... on ERC721Token", "... on MintLog", "... on TransferLog", "... on OrderLog"] {
            assert!(query.contains(fragment), "missing {}", fragment);
        }
        for field in ["endCursor", "hasNextPage", "hasPreviousPage", "startCursor"] {
            assert!(query.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn v1_document_has_no_pagination_surface() {
        let query = wallet_query(SchemaVersion::V1);
        assert!(!query.contains("pageInfo"));
        assert!(!query.contains("$after"));
        assert!(query.contains("transaction { valueInEth blockNumber estimatedConfirmedAt }"));
    }

    #[test]
    fn v2_variables_forward_the_cursor_verbatim() {
        let vars = wallet_variables(SchemaVersion::V2, "0xabc", Some("b3BhcXVl"));
        assert_eq!(vars["address"], "0xabc");
        assert_eq!(vars["after"], "b3BhcXVl");

        let vars = wallet_variables(SchemaVersion::V2, "0xabc", None);
        assert!(vars["after"].is_null());
    }

    #[test]
    fn v1_variables_carry_only_the_address() {
        let vars = wallet_variables(SchemaVersion::V1, "0xabc", None);
        assert_eq!(vars["address"], "0xabc");
        assert!(vars.get("after").is_none());
    }
}

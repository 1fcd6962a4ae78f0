// Runtime classification of loosely typed upstream objects into the
// gateway's concrete schema types. Everything here is a pure function of
// already-fetched JSON; no further network calls happen during
// classification.

use serde_json::Value;

/// The concrete variants behind the polymorphic `Log` interface, keyed by
/// the upstream `type` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Mint,
    Transfer,
    Order,
}

impl LogKind {
    /// Total mapping from the upstream discriminant to a variant. Any
    /// value outside the known set (or a missing field) classifies as
    /// "no resolvable type" and the caller drops the node.
    ///
    /// If the upstream enum grows, this table and `accepts` must be
    /// extended together.
    pub fn from_discriminant(value: &str) -> Option<LogKind> {
        match value {
            "MINT" => Some(LogKind::Mint),
            "TRANSFER" => Some(LogKind::Transfer),
            "ORDER" => Some(LogKind::Order),
            _ => None,
        }
    }

    /// Narrow acceptance check each concrete variant applies on top of
    /// the dispatch above, so a fragment for the wrong variant can never
    /// spuriously match.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            LogKind::Mint => value == "MINT",
            LogKind::Transfer => value == "TRANSFER",
            LogKind::Order => value == "ORDER",
        }
    }
}

/// Acceptance probe for `ERC721Token`, the only concrete `Token` variant:
/// an object belongs to it iff it carries a usable `tokenId`. A missing
/// or non-string `tokenId` excludes the object entirely (the schema marks
/// the field non-null, so there is nothing valid to build).
pub fn erc721_token_id(node: &Value) -> Option<&str> {
    node.get("tokenId").and_then(Value::as_str)
}

// Field helpers for walking the untyped upstream payload. Absent, null
// and wrongly typed values all read as None.

pub fn opt_string(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub fn opt_i32(node: &Value, key: &str) -> Option<i32> {
    node.get(key)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
}

pub fn opt_f64(node: &Value, key: &str) -> Option<f64> {
    node.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DISCRIMINANTS: [(&str, Option<LogKind>); 6] = [
        ("MINT", Some(LogKind::Mint)),
        ("TRANSFER", Some(LogKind::Transfer)),
        ("ORDER", Some(LogKind::Order)),
        ("BURN", None),
        ("mint", None),
        ("", None),
    ];

    #[test]
    fn token_with_token_id_classifies_as_erc721() {
        let node = json!({ "tokenId": "1", "name": "Foo" });
        assert_eq!(erc721_token_id(&node), Some("1"));
    }

    #[test]
    fn token_without_token_id_does_not_classify() {
        assert_eq!(erc721_token_id(&json!({ "name": "Foo" })), None);
        assert_eq!(erc721_token_id(&json!({ "tokenId": null })), None);
        assert_eq!(erc721_token_id(&json!({ "tokenId": 7 })), None);
    }

    #[test]
    fn log_dispatch_covers_every_discriminant() {
        for (value, expected) in DISCRIMINANTS {
            assert_eq!(LogKind::from_discriminant(value), expected);
        }
    }

    #[test]
    fn log_dispatch_is_idempotent() {
        for (value, _) in DISCRIMINANTS {
            assert_eq!(
                LogKind::from_discriminant(value),
                LogKind::from_discriminant(value)
            );
        }
    }

    #[test]
    fn variant_predicates_agree_with_dispatch() {
        for kind in [LogKind::Mint, LogKind::Transfer, LogKind::Order] {
            for (value, _) in DISCRIMINANTS {
                assert_eq!(
                    kind.accepts(value),
                    LogKind::from_discriminant(value) == Some(kind),
                    "predicate and dispatch disagree on {:?} for {:?}",
                    value,
                    kind
                );
            }
        }
    }

    #[test]
    fn field_helpers_tolerate_missing_and_mistyped_values() {
        let node = json!({ "blockNumber": 100, "estimatedConfirmedAt": "2021-01-01", "valueInEth": 0.5 });
        assert_eq!(opt_i32(&node, "blockNumber"), Some(100));
        assert_eq!(opt_string(&node, "estimatedConfirmedAt"), Some("2021-01-01".to_string()));
        assert_eq!(opt_f64(&node, "valueInEth"), Some(0.5));

        assert_eq!(opt_i32(&node, "missing"), None);
        assert_eq!(opt_string(&node, "blockNumber"), None);
        assert_eq!(opt_f64(&json!({ "valueInEth": "0.5" }), "valueInEth"), None);
    }
}

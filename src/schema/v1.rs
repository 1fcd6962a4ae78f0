// Earlier schema revision: activity logs are a single concrete type
// whose `type` is the raw upstream string, the transaction carries its
// own block fields, and the token connection does not paginate.

use std::sync::Arc;

use async_graphql::{Context, Interface, Object, SimpleObject};
use serde_json::Value;

use crate::delegate;
use crate::integrations::WalletSource;
use crate::resolve;
use crate::schema::SchemaVersion;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Looks up a wallet by address via one delegated upstream request.
    /// Upstream failures resolve to null instead of failing the query.
    async fn wallet(&self, ctx: &Context<'_>, address: Option<String>) -> Option<Wallet> {
        let address = address.filter(|a| !a.trim().is_empty())?;
        let source = ctx.data_unchecked::<Arc<dyn WalletSource>>();

        let query = delegate::wallet_query(SchemaVersion::V1);
        let variables = delegate::wallet_variables(SchemaVersion::V1, &address, None);

        match source.fetch_wallet(query, variables).await {
            Ok(Some(wallet)) => Some(Wallet::from_upstream(&wallet)),
            Ok(None) => None,
            Err(err) => {
                tracing::error!("Wallet lookup for {} failed: {}", address, err);
                None
            }
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Wallet {
    tokens: Option<TokenConnection>,
}

impl Wallet {
    pub(crate) fn from_upstream(wallet: &Value) -> Wallet {
        Wallet {
            tokens: wallet
                .get("tokens")
                .filter(|v| !v.is_null())
                .map(TokenConnection::from_upstream),
        }
    }
}

// This revision predates pagination, so the connection is just edges; an
// upstream payload without pageInfo is the normal case here.
#[derive(Debug, Clone, SimpleObject)]
pub struct TokenConnection {
    edges: Vec<TokenEdge>,
}

impl TokenConnection {
    fn from_upstream(tokens: &Value) -> TokenConnection {
        TokenConnection {
            edges: tokens
                .get("edges")
                .and_then(Value::as_array)
                .map(|edges| edges.iter().map(TokenEdge::from_upstream).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct TokenEdge {
    node: Option<Token>,
}

impl TokenEdge {
    fn from_upstream(edge: &Value) -> TokenEdge {
        TokenEdge {
            node: edge.get("node").and_then(Token::from_upstream),
        }
    }
}

#[derive(Debug, Clone, Interface)]
#[graphql(
    field(name = "token_id", ty = "&str"),
    field(name = "name", ty = "Option<&str>"),
    field(name = "contract", ty = "Option<&Contract>"),
    field(name = "logs", ty = "Option<&LogConnection>")
)]
pub enum Token {
    Erc721Token(Erc721Token),
}

impl Token {
    fn from_upstream(node: &Value) -> Option<Token> {
        let token_id = resolve::erc721_token_id(node)?;

        Some(Token::Erc721Token(Erc721Token {
            token_id: token_id.to_owned(),
            name: resolve::opt_string(node, "name"),
            contract: node
                .get("contract")
                .filter(|v| !v.is_null())
                .map(Contract::from_upstream),
            logs: node
                .get("logs")
                .filter(|v| !v.is_null())
                .map(LogConnection::from_upstream),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct Erc721Token {
    token_id: String,
    name: Option<String>,
    contract: Option<Contract>,
    logs: Option<LogConnection>,
}

#[Object(name = "ERC721Token")]
impl Erc721Token {
    async fn token_id(&self) -> &str {
        &self.token_id
    }

    async fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    async fn logs(&self) -> Option<&LogConnection> {
        self.logs.as_ref()
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Contract {
    address: Option<String>,
}

impl Contract {
    fn from_upstream(contract: &Value) -> Contract {
        Contract {
            address: resolve::opt_string(contract, "address"),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct LogConnection {
    edges: Vec<LogEdge>,
}

impl LogConnection {
    fn from_upstream(logs: &Value) -> LogConnection {
        LogConnection {
            edges: logs
                .get("edges")
                .and_then(Value::as_array)
                .map(|edges| edges.iter().map(LogEdge::from_upstream).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct LogEdge {
    node: Option<Log>,
}

impl LogEdge {
    fn from_upstream(edge: &Value) -> LogEdge {
        LogEdge {
            node: edge
                .get("node")
                .filter(|v| !v.is_null())
                .map(Log::from_upstream),
        }
    }
}

/// Single concrete log shape. No classification happens in this
/// revision: whatever `type` upstream sent is passed through as-is.
#[derive(Debug, Clone, SimpleObject)]
pub struct Log {
    block_number: Option<i32>,
    estimated_confirmed_at: Option<String>,
    #[graphql(name = "type")]
    log_type: Option<String>,
    transaction: Option<Transaction>,
}

impl Log {
    fn from_upstream(node: &Value) -> Log {
        Log {
            block_number: resolve::opt_i32(node, "blockNumber"),
            estimated_confirmed_at: resolve::opt_string(node, "estimatedConfirmedAt"),
            log_type: resolve::opt_string(node, "type"),
            transaction: node
                .get("transaction")
                .filter(|v| !v.is_null())
                .map(Transaction::from_upstream),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Transaction {
    value_in_eth: Option<f64>,
    block_number: Option<i32>,
    estimated_confirmed_at: Option<String>,
}

impl Transaction {
    fn from_upstream(transaction: &Value) -> Transaction {
        Transaction {
            value_in_eth: resolve::opt_f64(transaction, "valueInEth"),
            block_number: resolve::opt_i32(transaction, "blockNumber"),
            estimated_confirmed_at: resolve::opt_string(transaction, "estimatedConfirmedAt"),
        }
    }
}

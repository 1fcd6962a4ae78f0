// Later schema revision: activity logs are a polymorphic interface
// discriminated by `LogType`, and the token connection supports forward
// pagination via an opaque `after` cursor.

use std::sync::Arc;

use async_graphql::{Context, Enum, Interface, Object, SimpleObject};
use serde_json::Value;

use crate::delegate;
use crate::integrations::WalletSource;
use crate::resolve::{self, LogKind};
use crate::schema::SchemaVersion;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Looks up a wallet by address. The whole subtree is fetched from
    /// upstream in one delegated request; an upstream failure resolves
    /// to null here instead of failing the query.
    async fn wallet(
        &self,
        ctx: &Context<'_>,
        address: Option<String>,
        after: Option<String>,
    ) -> Option<Wallet> {
        let address = address.filter(|a| !a.trim().is_empty())?;
        let source = ctx.data_unchecked::<Arc<dyn WalletSource>>();

        let query = delegate::wallet_query(SchemaVersion::V2);
        let variables = delegate::wallet_variables(SchemaVersion::V2, &address, after.as_deref());

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

#[derive(Debug, Clone, SimpleObject)]
pub struct TokenConnection {
    edges: Vec<TokenEdge>,
    page_info: Option<PageInfo>,
}

impl TokenConnection {
    fn from_upstream(tokens: &Value) -> TokenConnection {
        let edges = tokens
            .get("edges")
            .and_then(Value::as_array)
            .map(|edges| edges.iter().map(TokenEdge::from_upstream).collect())
            .unwrap_or_default();

        TokenConnection {
            edges,
            page_info: tokens
                .get("pageInfo")
                .filter(|v| !v.is_null())
                .map(PageInfo::from_upstream),
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

/// Token holdings interface. `ERC721Token` is the only concrete variant
/// today; further token standards slot in as new variants.
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
    /// An upstream object counts as an `ERC721Token` iff it carries a
    /// usable `tokenId`. Anything else stays unresolved and the edge's
    /// node goes null.
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
            node: edge.get("node").and_then(Log::from_upstream),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum LogType {
    Mint,
    Order,
    Transfer,
}

impl From<LogKind> for LogType {
    fn from(kind: LogKind) -> LogType {
        match kind {
            LogKind::Mint => LogType::Mint,
            LogKind::Transfer => LogType::Transfer,
            LogKind::Order => LogType::Order,
        }
    }
}

/// Activity log interface. The concrete variant is decided by `LogKind`
/// dispatch on the upstream `type` field; an unrecognized discriminant
/// leaves the node unresolved without touching sibling edges.
#[derive(Debug, Clone, Interface)]
#[graphql(
    field(name = "block_number", ty = "Option<i32>"),
    field(name = "estimated_confirmed_at", ty = "Option<&str>")
)]
pub enum Log {
    Mint(MintLog),
    Transfer(TransferLog),
    Order(OrderLog),
}

impl Log {
    fn from_upstream(node: &Value) -> Option<Log> {
        let discriminant = node.get("type").and_then(Value::as_str)?;
        let kind = LogKind::from_discriminant(discriminant)?;
        debug_assert!(kind.accepts(discriminant));

        let block_number = resolve::opt_i32(node, "blockNumber");
        let estimated_confirmed_at = resolve::opt_string(node, "estimatedConfirmedAt");
        let transaction = node
            .get("transaction")
            .filter(|v| !v.is_null())
            .map(Transaction::from_upstream);
        let log_type = LogType::from(kind);

        Some(match kind {
            LogKind::Mint => Log::Mint(MintLog {
                block_number,
                estimated_confirmed_at,
                transaction,
                log_type,
            }),
            LogKind::Transfer => Log::Transfer(TransferLog {
                block_number,
                estimated_confirmed_at,
                transaction,
                log_type,
            }),
            LogKind::Order => Log::Order(OrderLog {
                block_number,
                estimated_confirmed_at,
                transaction,
                log_type,
            }),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MintLog {
    block_number: Option<i32>,
    estimated_confirmed_at: Option<String>,
    transaction: Option<Transaction>,
    log_type: LogType,
}

#[Object]
impl MintLog {
    async fn block_number(&self) -> Option<i32> {
        self.block_number
    }

    async fn estimated_confirmed_at(&self) -> Option<&str> {
        self.estimated_confirmed_at.as_deref()
    }

    async fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    #[graphql(name = "type")]
    async fn log_type(&self) -> LogType {
        self.log_type
    }
}

#[derive(Debug, Clone)]
pub struct TransferLog {
    block_number: Option<i32>,
    estimated_confirmed_at: Option<String>,
    transaction: Option<Transaction>,
    log_type: LogType,
}

#[Object]
impl TransferLog {
    async fn block_number(&self) -> Option<i32> {
        self.block_number
    }

    async fn estimated_confirmed_at(&self) -> Option<&str> {
        self.estimated_confirmed_at.as_deref()
    }

    async fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    #[graphql(name = "type")]
    async fn log_type(&self) -> LogType {
        self.log_type
    }
}

#[derive(Debug, Clone)]
pub struct OrderLog {
    block_number: Option<i32>,
    estimated_confirmed_at: Option<String>,
    transaction: Option<Transaction>,
    log_type: LogType,
}

#[Object]
impl OrderLog {
    async fn block_number(&self) -> Option<i32> {
        self.block_number
    }

    async fn estimated_confirmed_at(&self) -> Option<&str> {
        self.estimated_confirmed_at.as_deref()
    }

    async fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    #[graphql(name = "type")]
    async fn log_type(&self) -> LogType {
        self.log_type
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Transaction {
    value_in_eth: Option<f64>,
}

impl Transaction {
    fn from_upstream(transaction: &Value) -> Transaction {
        Transaction {
            value_in_eth: resolve::opt_f64(transaction, "valueInEth"),
        }
    }
}

/// Forwarded verbatim from the upstream connection. Cursors are opaque
/// tokens; nothing here parses or re-encodes them.
#[derive(Debug, Clone, SimpleObject)]
pub struct PageInfo {
    end_cursor: Option<String>,
    start_cursor: Option<String>,
    has_next_page: bool,
    has_previous_page: bool,
}

impl PageInfo {
    fn from_upstream(page_info: &Value) -> PageInfo {
        PageInfo {
            end_cursor: resolve::opt_string(page_info, "endCursor"),
            start_cursor: resolve::opt_string(page_info, "startCursor"),
            has_next_page: page_info
                .get("hasNextPage")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            has_previous_page: page_info
                .get("hasPreviousPage")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

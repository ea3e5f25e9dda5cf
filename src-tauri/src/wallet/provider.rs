// Wallet provider seam and its Ethereum JSON-RPC implementation

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::units::parse_quantity;
use super::WalletError;

/// Error code a provider returns when the user declines a request (EIP-1193)
pub const USER_REJECTED: i64 = 4001;

/// The operations the wallet window needs from an external wallet
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Accounts the user has already authorized, without prompting
    async fn accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Ask the user to authorize accounts
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Latest balance of `address`, in wei
    async fn balance(&self, address: &str) -> Result<u128, WalletError>;
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// Talks to a wallet over Ethereum JSON-RPC (HTTP POST)
pub struct JsonRpcProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, method, url = %self.url, "wallet rpc request");

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_response(response)
    }
}

fn decode_response(response: RpcResponse) -> Result<Value, WalletError> {
    match (response.result, response.error) {
        (_, Some(error)) if error.code == USER_REJECTED => Err(WalletError::Rejected(error.message)),
        (_, Some(error)) => Err(WalletError::Rpc {
            code: error.code,
            message: error.message,
        }),
        (Some(result), None) => Ok(result),
        (None, None) => Err(WalletError::InvalidResponse(
            "response has neither result nor error".to_string(),
        )),
    }
}

/// `0x` followed by 40 hex digits
fn is_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

fn decode_accounts(value: Value) -> Result<Vec<String>, WalletError> {
    let accounts: Vec<String> = serde_json::from_value(value)
        .map_err(|e| WalletError::InvalidResponse(format!("bad account list: {}", e)))?;

    if let Some(bad) = accounts.iter().find(|a| !is_address(a)) {
        return Err(WalletError::InvalidResponse(format!("not an account address: {:?}", bad)));
    }
    Ok(accounts)
}

impl WalletProvider for JsonRpcProvider {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        decode_accounts(self.call("eth_accounts", json!([])).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        decode_accounts(self.call("eth_requestAccounts", json!([])).await?)
    }

    async fn balance(&self, address: &str) -> Result<u128, WalletError> {
        let value = self
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        let hex = value
            .as_str()
            .ok_or_else(|| WalletError::InvalidResponse(format!("balance is not a string: {}", value)))?;
        parse_quantity(hex)
    }
}

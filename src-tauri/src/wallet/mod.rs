pub mod provider;
pub mod units;

use serde::Serialize;
use tracing::{info, warn};

pub use provider::{JsonRpcProvider, WalletProvider};
use units::{display_balance, format_ether};

pub const NO_WALLET_NOTICE: &str = "Please install MetaMask or another Web3 wallet!";
pub const CONNECT_FAILED_NOTICE: &str = "Failed to connect wallet. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider available")]
    NoProvider,

    #[error("Request rejected by user: {0}")]
    Rejected(String),

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),
}

/// An authorized account and its balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: String,
    pub balance_wei: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletStatus {
    Disconnected,
    /// Authorization request in flight
    Connecting,
    Connected(Account),
}

/// Wallet window state, as the webview draws it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WalletView {
    pub status: &'static str,
    pub provider_available: bool,
    pub address: Option<String>,
    /// Rounded for display, e.g. "1.2346 ETH"
    pub balance: Option<String>,
    /// Full precision, for tooltips
    pub balance_ether: Option<String>,
    pub notice: Option<String>,
}

/// Display state for the wallet window. Provider calls happen outside this
/// type; their outcomes are applied with the `finish_*` methods.
#[derive(Debug)]
pub struct WalletConnection {
    status: WalletStatus,
    notice: Option<String>,
    provider_available: bool,
}

impl WalletConnection {
    pub fn new(provider_available: bool) -> Self {
        Self {
            status: WalletStatus::Disconnected,
            notice: None,
            provider_available,
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> &WalletStatus {
        &self.status
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether opening a wallet window should look for an authorized account.
    /// Only a disconnected wallet with a provider has anything to find.
    pub fn wants_check(&self) -> bool {
        self.provider_available && self.status == WalletStatus::Disconnected
    }

    /// Start a connect attempt. Fails with [`WalletError::NoProvider`] (and
    /// leaves the install notice) when no wallet is available.
    pub fn begin_connect(&mut self) -> Result<(), WalletError> {
        self.notice = None;
        if !self.provider_available {
            self.notice = Some(NO_WALLET_NOTICE.to_string());
            return Err(WalletError::NoProvider);
        }
        self.status = WalletStatus::Connecting;
        Ok(())
    }

    /// Apply the outcome of a connect attempt. Failures roll back to disconnected.
    pub fn finish_connect(&mut self, result: Result<Account, WalletError>) {
        match result {
            Ok(account) => {
                info!(address = %account.address, "wallet connected");
                self.status = WalletStatus::Connected(account);
            }
            Err(e) => {
                warn!(error = %e, "wallet connection failed");
                self.status = WalletStatus::Disconnected;
                self.notice = Some(CONNECT_FAILED_NOTICE.to_string());
            }
        }
    }

    /// Apply the outcome of a silent check. Only an authorized account changes
    /// anything; errors are logged and otherwise ignored.
    pub fn finish_check(&mut self, result: Result<Option<Account>, WalletError>) {
        match result {
            Ok(Some(account)) => {
                if self.status == WalletStatus::Connecting {
                    // A user-driven connect owns the state until it finishes
                    return;
                }
                self.status = WalletStatus::Connected(account);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "wallet check failed"),
        }
    }

    /// Forget the account locally. The provider keeps its authorization.
    pub fn disconnect(&mut self) {
        if let WalletStatus::Connected(account) = &self.status {
            info!(address = %account.address, "wallet disconnected");
        }
        self.status = WalletStatus::Disconnected;
        self.notice = None;
    }

    pub fn view(&self) -> WalletView {
        let (status, account) = match &self.status {
            WalletStatus::Disconnected => ("disconnected", None),
            WalletStatus::Connecting => ("connecting", None),
            WalletStatus::Connected(account) => ("connected", Some(account)),
        };

        WalletView {
            status,
            provider_available: self.provider_available,
            address: account.map(|a| a.address.clone()),
            balance: account.map(|a| display_balance(a.balance_wei)),
            balance_ether: account.map(|a| format_ether(a.balance_wei)),
            notice: self.notice.clone(),
        }
    }
}

/// Look for an already-authorized account without prompting the user
pub async fn check<P: WalletProvider>(provider: &P) -> Result<Option<Account>, WalletError> {
    let accounts = provider.accounts().await?;
    let Some(address) = accounts.into_iter().next() else {
        return Ok(None);
    };
    let balance_wei = provider.balance(&address).await?;
    Ok(Some(Account {
        address,
        balance_wei,
    }))
}

/// Ask the user to authorize an account, then read its balance
pub async fn connect<P: WalletProvider>(provider: &P) -> Result<Account, WalletError> {
    let accounts = provider.request_accounts().await?;
    let address = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;
    let balance_wei = provider.balance(&address).await?;
    Ok(Account {
        address,
        balance_wei,
    })
}

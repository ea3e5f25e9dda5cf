// Desktop configuration: optional retrodesk.toml plus environment overrides

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::window_view::Viewport;

pub const CONFIG_FILE_NAME: &str = "retrodesk.toml";
/// Wallet JSON-RPC endpoint; overrides `wallet.rpc_url`
pub const WALLET_RPC_ENV: &str = "RETRODESK_WALLET_RPC";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesktopConfig {
    /// Viewport assumed until the webview reports its real size
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub clock_24h: bool,
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WalletConfig {
    /// No endpoint means no wallet is available
    pub rpc_url: Option<String>,
    pub install_url: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            clock_24h: true,
            wallet: WalletConfig::default(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            install_url: "https://metamask.io/download/".to_string(),
        }
    }
}

impl DesktopConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`. A missing file is not an error and yields `None`.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(path, &text).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from `dir/retrodesk.toml`, falling back to defaults, then apply
    /// environment overrides. Never fails: a broken file is logged and skipped.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut config = match dir.map(|d| d.join(CONFIG_FILE_NAME)) {
            Some(path) => match Self::read(&path) {
                Ok(Some(config)) => {
                    info!(path = %path.display(), "loaded desktop config");
                    config
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    warn!(error = %e, "ignoring desktop config");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        config.apply_env(std::env::var(WALLET_RPC_ENV).ok());
        config
    }

    fn apply_env(&mut self, wallet_rpc: Option<String>) {
        if let Some(url) = wallet_rpc.filter(|u| !u.trim().is_empty()) {
            self.wallet.rpc_url = Some(url);
        }
    }
}

use async_trait::async_trait;
use std::fmt;

use super::abi::{AbiError, RawProject};
use super::ethereum::WalletError;

/// Hash of a submitted transaction (`0x`-prefixed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receipt of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
}

/// Arguments of the `createProject` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectCall {
    pub name: String,
    pub description: String,
    /// Seconds since the unix epoch
    pub timestamp: u64,
    /// Project fee in wei
    pub fee: u128,
    /// Value attached to the transaction (fee + verification surcharge) in wei
    pub value: u128,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    WalletMissing,
    NoAccount,
    WrongNetwork { expected: u64, actual: u64 },
    NotConfigured(String),
    Wallet(WalletError),
    Decode(String),
    Reverted(String),
    ConfirmationTimeout(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::WalletMissing => write!(f, "MetaMask is not installed!"),
            GatewayError::NoAccount => write!(f, "No account is connected in the wallet"),
            GatewayError::WrongNetwork { expected, actual } => write!(
                f,
                "Wallet is on chain {} but the contract lives on chain {}",
                actual, expected
            ),
            GatewayError::NotConfigured(msg) => write!(f, "Contract not configured: {}", msg),
            GatewayError::Wallet(err) => write!(f, "{}", err),
            GatewayError::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
            GatewayError::Reverted(hash) => write!(f, "Transaction {} reverted", hash),
            GatewayError::ConfirmationTimeout(hash) => {
                write!(f, "Timed out waiting for transaction {}", hash)
            }
        }
    }
}

impl From<WalletError> for GatewayError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NotInstalled => GatewayError::WalletMissing,
            other => GatewayError::Wallet(other),
        }
    }
}

impl From<AbiError> for GatewayError {
    fn from(err: AbiError) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Chain session used by the projects page.
///
/// Injected into the page instead of reaching for `window.ethereum`
/// directly, so the page logic can run against any implementation.
#[async_trait(?Send)]
pub trait ChainGateway {
    /// Whether a wallet is present at all
    fn is_available(&self) -> bool;

    /// Acquire the signing account
    async fn signer_address(&self) -> Result<String, GatewayError>;

    /// Projects created by `address` (client role)
    async fn projects_by_owner(&self, address: &str) -> Result<Vec<RawProject>, GatewayError>;

    /// Projects assigned to `address` (freelancer role)
    async fn projects_for_freelancer(&self, address: &str)
        -> Result<Vec<RawProject>, GatewayError>;

    async fn create_project(&self, call: CreateProjectCall) -> Result<TxHash, GatewayError>;

    async fn remove_project(&self, project_id: u64) -> Result<TxHash, GatewayError>;

    /// Suspend until the transaction is part of the canonical chain
    async fn wait_for_confirmation(&self, tx: &TxHash) -> Result<TxReceipt, GatewayError>;
}

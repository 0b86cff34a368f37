use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};

use super::abi::{self, RawProject, Token};
use super::ethereum::EthereumProvider;
use super::gateway::{ChainGateway, CreateProjectCall, GatewayError, TxHash, TxReceipt};
use super::settings::UserSettings;

/// Escrow contract client talking through the browser wallet
pub struct EscrowContract {
    contract_address: Option<String>,
    chain_id: u64,
    poll_interval_ms: u32,
    max_polls: u32,
}

impl EscrowContract {
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            contract_address: settings.contract_address(),
            chain_id: settings.network_config().chain_id,
            poll_interval_ms: settings.poll_interval_ms,
            max_polls: settings.confirmation_polls(),
        }
    }

    fn contract_address(&self) -> Result<&str, GatewayError> {
        self.contract_address
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("no escrow contract address set".to_string()))
    }

    /// Fail early when the wallet is pointed at another chain
    async fn ensure_chain(&self, provider: &EthereumProvider) -> Result<(), GatewayError> {
        let value = provider.request("eth_chainId", json!([])).await?;
        let actual = value
            .as_str()
            .and_then(parse_quantity)
            .ok_or_else(|| GatewayError::Decode(format!("unexpected chain id {}", value)))?;

        if actual != self.chain_id as u128 {
            return Err(GatewayError::WrongNetwork {
                expected: self.chain_id,
                actual: actual as u64,
            });
        }
        Ok(())
    }

    async fn call_projects(&self, signature: &str, address: &str) -> Result<Vec<RawProject>, GatewayError> {
        let provider = EthereumProvider::detect()?;
        let contract = self.contract_address()?;
        let owner = abi::parse_address(address)?;
        let data = abi::encode_call(abi::selector(signature), &[Token::Address(owner)]);

        let result = provider
            .request(
                "eth_call",
                json!([
                    { "from": address, "to": contract, "data": abi::to_hex_prefixed(&data) },
                    "latest"
                ]),
            )
            .await?;

        let encoded = result
            .as_str()
            .ok_or_else(|| GatewayError::Decode(format!("eth_call returned {}", result)))?;
        let projects = abi::decode_projects(&abi::from_hex_prefixed(encoded)?)?;
        log::debug!("{} returned {} projects", signature, projects.len());
        Ok(projects)
    }

    async fn send_transaction(&self, data: Vec<u8>, value: u128) -> Result<TxHash, GatewayError> {
        let provider = EthereumProvider::detect()?;
        let contract = self.contract_address()?;
        let from = self.signer_address().await?;

        let mut tx = json!({
            "from": from,
            "to": contract,
            "data": abi::to_hex_prefixed(&data),
        });
        if value > 0 {
            tx["value"] = Value::String(format!("0x{:x}", value));
        }

        let result = provider.request("eth_sendTransaction", json!([tx])).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| GatewayError::Decode(format!("eth_sendTransaction returned {}", result)))?;

        log::info!("Transaction submitted: {}", hash);
        Ok(TxHash(hash.to_string()))
    }
}

#[async_trait(?Send)]
impl ChainGateway for EscrowContract {
    fn is_available(&self) -> bool {
        EthereumProvider::is_installed()
    }

    async fn signer_address(&self) -> Result<String, GatewayError> {
        let provider = EthereumProvider::detect()?;
        let accounts = provider.request("eth_requestAccounts", json!([])).await?;
        self.ensure_chain(&provider).await?;

        accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(GatewayError::NoAccount)
    }

    async fn projects_by_owner(&self, address: &str) -> Result<Vec<RawProject>, GatewayError> {
        self.call_projects(abi::GET_PROJECTS_BY_ADDRESS, address).await
    }

    async fn projects_for_freelancer(&self, address: &str) -> Result<Vec<RawProject>, GatewayError> {
        self.call_projects(abi::GET_PROJECTS_FOR_FREELANCER, address).await
    }

    async fn create_project(&self, call: CreateProjectCall) -> Result<TxHash, GatewayError> {
        let data = abi::encode_call(
            abi::selector(abi::CREATE_PROJECT),
            &[
                Token::String(call.name),
                Token::String(call.description),
                Token::Uint(call.timestamp as u128),
                Token::Uint(call.fee),
            ],
        );
        self.send_transaction(data, call.value).await
    }

    async fn remove_project(&self, project_id: u64) -> Result<TxHash, GatewayError> {
        let data = abi::encode_call(
            abi::selector(abi::REMOVE_PROJECT),
            &[Token::Uint(project_id as u128)],
        );
        self.send_transaction(data, 0).await
    }

    async fn wait_for_confirmation(&self, tx: &TxHash) -> Result<TxReceipt, GatewayError> {
        let provider = EthereumProvider::detect()?;

        for attempt in 0..self.max_polls {
            let receipt = provider
                .request("eth_getTransactionReceipt", json!([tx.0]))
                .await?;

            if let Some(status) = receipt.get("status").and_then(Value::as_str) {
                let block_number = receipt
                    .get("blockNumber")
                    .and_then(Value::as_str)
                    .and_then(parse_quantity)
                    .map(|n| n as u64);

                return match parse_quantity(status) {
                    Some(1) => {
                        log::info!("Transaction {} confirmed in block {:?}", tx, block_number);
                        Ok(TxReceipt { hash: tx.clone(), block_number })
                    }
                    _ => Err(GatewayError::Reverted(tx.0.clone())),
                };
            }

            log::debug!("Waiting for receipt of {} (attempt {})", tx, attempt + 1);
            TimeoutFuture::new(self.poll_interval_ms).await;
        }

        Err(GatewayError::ConfirmationTimeout(tx.0.clone()))
    }
}

/// Parse a JSON-RPC hex quantity such as `"0x1"`
fn parse_quantity(value: &str) -> Option<u128> {
    let digits = value.strip_prefix("0x")?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::network_config::NetworkType;

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_quantity("0x1"), Some(1));
        assert_eq!(parse_quantity("0xaa36a7"), Some(11_155_111));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("12"), None);
    }

    #[test]
    fn missing_contract_address_is_reported() {
        let settings = UserSettings {
            network: NetworkType::Mainnet,
            ..UserSettings::default()
        };
        let mut contract = EscrowContract::from_settings(&settings);
        contract.contract_address = None;
        assert!(matches!(
            contract.contract_address(),
            Err(GatewayError::NotConfigured(_))
        ));
    }

    #[test]
    fn settings_drive_polling() {
        let settings = UserSettings {
            custom_contract_address: "0x00000000000000000000000000000000000000aa".to_string(),
            confirmation_timeout_secs: 10,
            poll_interval_ms: 1_000,
            ..UserSettings::default()
        };
        let contract = EscrowContract::from_settings(&settings);
        assert_eq!(contract.max_polls, 10);
        assert_eq!(contract.chain_id, 11_155_111);
        assert_eq!(
            contract.contract_address().unwrap(),
            "0x00000000000000000000000000000000000000aa"
        );
    }
}

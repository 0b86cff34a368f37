use serde::{Deserialize, Serialize};
use web_sys::Storage;

use super::constants::{DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_RECEIPT_POLL_INTERVAL_MS};
use super::network_config::{NetworkConfig, NetworkType};

const STORAGE_PREFIX: &str = "escrow-projects.settings.";
/// Remembers which network was saved last
const NETWORK_KEY: &str = "escrow-projects.network";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub network: NetworkType,
    /// Overrides the build-time contract address when non-empty
    pub custom_contract_address: String,
    pub confirmation_timeout_secs: u32,
    pub poll_interval_ms: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            network: NetworkType::Sepolia,
            custom_contract_address: String::new(),
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
        }
    }
}

impl UserSettings {
    fn local_storage() -> Option<Storage> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
    }

    fn storage_key(network: NetworkType) -> String {
        format!("{}{}", STORAGE_PREFIX, network.as_str())
    }

    /// Network the user saved last, Sepolia when none was saved
    fn stored_network(storage: Option<&Storage>) -> NetworkType {
        storage
            .and_then(|storage| storage.get_item(NETWORK_KEY).ok().flatten())
            .and_then(|value| NetworkType::from_str_opt(&value))
            .unwrap_or(NetworkType::Sepolia)
    }

    /// Load the settings of the last saved network
    pub fn load() -> Self {
        let storage = Self::local_storage();
        let network = Self::stored_network(storage.as_ref());
        Self::read(storage.as_ref(), network)
    }

    /// Load the settings stored for one network; missing or corrupt entries fall back to defaults
    pub fn load_for(network: NetworkType) -> Self {
        Self::read(Self::local_storage().as_ref(), network)
    }

    fn read(storage: Option<&Storage>, network: NetworkType) -> Self {
        let stored = storage
            .and_then(|storage| storage.get_item(&Self::storage_key(network)).ok().flatten());

        let mut settings = match stored {
            Some(value) => Self::from_json(&value),
            None => Self::default(),
        };
        // the key decides the network, not the stored body
        settings.network = network;
        settings
    }

    /// Save under this network's key and make it the network loaded next time
    pub fn save(&self) -> Result<(), String> {
        let storage = Self::local_storage().ok_or_else(|| "Local storage not available".to_string())?;
        let serialized = serde_json::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        storage
            .set_item(&Self::storage_key(self.network), &serialized)
            .map_err(|_| "Failed to write settings to local storage".to_string())?;
        storage
            .set_item(NETWORK_KEY, self.network.as_str())
            .map_err(|_| "Failed to write selected network to local storage".to_string())?;

        log::info!("Saved settings for {}", self.network.display_name());
        Ok(())
    }

    fn from_json(value: &str) -> Self {
        serde_json::from_str(value).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    pub fn network_config(&self) -> &'static NetworkConfig {
        NetworkConfig::for_network(self.network)
    }

    /// Contract address to talk to: user override first, then the build-time default
    pub fn contract_address(&self) -> Option<String> {
        let trimmed = self.custom_contract_address.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
        self.network_config().contract_address.map(str::to_string)
    }

    /// Number of receipt polls that fit into the confirmation timeout
    pub fn confirmation_polls(&self) -> u32 {
        let interval = self.poll_interval_ms.max(1) as u64;
        let timeout_ms = self.confirmation_timeout_secs as u64 * 1_000;
        (timeout_ms / interval).max(1) as u32
    }
}

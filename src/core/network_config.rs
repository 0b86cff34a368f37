use serde::{Deserialize, Serialize};

/// Network environment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    /// Sepolia testnet
    Sepolia,
    /// Ethereum mainnet
    Mainnet,
}

/// Network configuration: chain id and escrow contract coordinates
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: u64,
    /// Escrow contract address baked in at build time, if any
    pub contract_address: Option<&'static str>,
}

impl NetworkConfig {
    /// Sepolia configuration
    const SEPOLIA: NetworkConfig = NetworkConfig {
        chain_id: 11_155_111,
        contract_address: option_env!("ESCROW_CONTRACT_SEPOLIA"),
    };

    /// Mainnet configuration
    const MAINNET: NetworkConfig = NetworkConfig {
        chain_id: 1,
        contract_address: option_env!("ESCROW_CONTRACT_MAINNET"),
    };

    /// Get network configuration for specific network type
    pub fn for_network(network: NetworkType) -> &'static NetworkConfig {
        match network {
            NetworkType::Sepolia => &Self::SEPOLIA,
            NetworkType::Mainnet => &Self::MAINNET,
        }
    }
}

impl NetworkType {
    pub const ALL: [NetworkType; 2] = [NetworkType::Sepolia, NetworkType::Mainnet];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Sepolia => "sepolia",
            NetworkType::Mainnet => "mainnet",
        }
    }

    /// Inverse of `as_str`
    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|network| network.as_str() == value)
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, NetworkType::Mainnet)
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkType::Sepolia => "Sepolia Testnet",
            NetworkType::Mainnet => "Mainnet",
        }
    }

    pub fn chain_id(&self) -> u64 {
        NetworkConfig::for_network(*self).chain_id
    }
}

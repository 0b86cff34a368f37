pub mod abi;
pub mod constants;
pub mod contract;
pub mod ethereum;
pub mod gateway;
pub mod network_config;
pub mod notice;
pub mod project_state;
pub mod projects;
pub mod settings;
pub mod status;
pub mod units;

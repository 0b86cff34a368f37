/// Shared constants used across the projects page and the contract client
///
/// Amounts are expressed in wei (the ledger's smallest unit) unless the
/// name says otherwise.

// ============================================================================
// Unit Constants
// ============================================================================

/// Number of fractional digits in one ether
pub const ETHER_DECIMALS: usize = 18;

/// Wei per ether (10^18)
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

// ============================================================================
// Fee Constants
// ============================================================================

/// Verification surcharge attached to every project creation (0.0003 ether)
pub const VERIFICATION_FEE_WEI: u128 = 300_000_000_000_000;

/// Display form of the verification surcharge
pub const VERIFICATION_FEE_DISPLAY: &str = "0.0003";

/// Currency symbol shown next to amounts
pub const CURRENCY_SYMBOL: &str = "ETH";

// ============================================================================
// Confirmation Polling
// ============================================================================

/// Delay between two receipt polls
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u32 = 2_000;

/// How long to wait for a receipt before giving up
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u32 = 180;

// ============================================================================
// User Notices
// ============================================================================

pub const NOTICE_WALLET_MISSING: &str = "MetaMask is not installed!";
pub const NOTICE_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const NOTICE_INVALID_PROJECT_ID: &str = "Invalid project identifier";
pub const NOTICE_PROJECT_CREATED: &str = "Project created successfully!";
pub const NOTICE_PROJECT_REMOVED: &str = "Project removed successfully!";
pub const NOTICE_CREATE_FAILED: &str = "Error creating project. Please try again.";

//! Network URL constants for the Tally SDK.

/// Default ledger access node REST base URL (local emulator).
pub const DEFAULT_ACCESS_URL: &str = "http://127.0.0.1:8888";

/// Default content store API host.
pub const DEFAULT_STORE_HOST: &str = "ipfs.infura.io";

/// Default content store API port.
pub const DEFAULT_STORE_PORT: u16 = 5001;

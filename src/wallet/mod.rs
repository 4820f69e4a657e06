//! Wallet - capability traits over the external wallet engine
//!
//! The command layer never owns wallet state. It reads through [`Wallet`] and
//! drives the few lifecycle operations `reset` needs.
//!
//! # Lifecycle
//!
//! ```text
//! loaded ──clear_cache_and_shutdown──→ shut down ──load(file, password)──→ loaded
//!                                          │
//!                                          └── every accessor fails until reloaded
//! ```

mod info;
mod keys;

pub use info::{lock, SharedWalletInfo, WalletInfo};
pub use keys::{generate_view_from_spend, keys_are_deterministic, SecretKey};

use crate::error::WalletResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Handle to a wallet owned by the external engine.
pub trait Wallet {
    /// Balance still locked by confirmations, in atomic units.
    fn pending_balance(&self) -> WalletResult<u64>;

    /// Spendable balance, in atomic units.
    fn actual_balance(&self) -> WalletResult<u64>;

    /// Height the wallet has scanned the chain to.
    fn block_count(&self) -> WalletResult<u32>;

    fn view_secret_key(&self) -> WalletResult<SecretKey>;

    /// Spend key of the primary address. Null for view-only wallets.
    fn spend_secret_key(&self) -> WalletResult<SecretKey>;

    fn address(&self) -> WalletResult<String>;

    fn transaction_count(&self) -> WalletResult<usize>;

    fn transaction(&self, index: usize) -> WalletResult<WalletTransaction>;

    /// Called once per poll while syncing.
    fn update_internal_cache(&mut self) -> WalletResult<()> {
        Ok(())
    }

    fn save(&mut self) -> WalletResult<()>;

    /// Wipe cached transactions and balances, then shut down. The handle is
    /// unusable until [`Wallet::load`] succeeds.
    fn clear_cache_and_shutdown(&mut self) -> WalletResult<()>;

    /// Reopen `file`. Fails with [`WalletError::WrongPassword`] when the
    /// wallet does not accept `password`.
    ///
    /// [`WalletError::WrongPassword`]: crate::error::WalletError::WrongPassword
    fn load(&mut self, file: &Path, password: &str) -> WalletResult<()>;
}

/// One wallet transaction. Negative `total_amount` means funds left the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub hash: String,
    pub total_amount: i64,
    pub fee: u64,
    pub block_height: u32,
    /// Unix seconds, 0 while unconfirmed.
    pub timestamp: u64,
    pub payment_id: Option<String>,
}

impl WalletTransaction {
    pub fn is_incoming(&self) -> bool {
        self.total_amount > 0
    }

    pub fn is_outgoing(&self) -> bool {
        self.total_amount < 0
    }

    /// Fusion transactions move funds between our own outputs.
    pub fn is_fusion(&self) -> bool {
        self.total_amount == 0
    }
}

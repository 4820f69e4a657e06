//! Sync - walk the wallet up to the daemon's height
//!
//! Polls the wallet until its scanned height reaches the daemon's local height,
//! reporting progress and announcing transactions found on the way. Runs on the
//! calling thread; each poll sleeps between reads.

use crate::commands::{print_incoming_transfer, print_outgoing_transfer};
use crate::console::{Console, Severity};
use crate::core::amount::TICKER;
use crate::error::WalletResult;
use crate::node::Node;
use crate::wallet::WalletInfo;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Pause between polls while the wallet is moving.
    pub poll_interval: Duration,
    /// Pause between polls while the wallet height is stuck.
    pub stall_interval: Duration,
    /// Save the wallet every this many polls. 0 turns periodic saves off.
    pub save_every: u32,
    /// Consecutive stuck polls before warning and forcing a save. 0 turns the
    /// warning off.
    pub stall_limit: u32,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            stall_interval: Duration::from_secs(3),
            save_every: 60,
            stall_limit: 20,
        }
    }
}

impl SyncOptions {
    /// No sleeping at all.
    pub fn immediate() -> Self {
        Self { poll_interval: Duration::ZERO, stall_interval: Duration::ZERO, ..Default::default() }
    }
    pub fn with_poll_interval(mut self, d: Duration) -> Self { self.poll_interval = d; self }
    pub fn with_stall_interval(mut self, d: Duration) -> Self { self.stall_interval = d; self }
    pub fn with_save_every(mut self, polls: u32) -> Self { self.save_every = polls; self }
    pub fn with_stall_limit(mut self, polls: u32) -> Self { self.stall_limit = polls; self }
}

pub fn sync_wallet(
    console: &mut dyn Console,
    node: &dyn Node,
    info: &mut WalletInfo,
    options: &SyncOptions,
) -> WalletResult<()> {
    let (mut local_height, remote_height) = node.heights()?;
    let mut wallet_height = info.wallet.block_count()?;
    let mut transaction_count = info.wallet.transaction_count()?;

    if local_height != remote_height {
        console.line(&format!("Your {}d isn't fully synced yet!", TICKER));
        console.line("Until you are fully synced, you won't be able to send transactions,");
        console.line("and your balance may be missing or incorrect!");
        console.blank();
    }

    if wallet_height <= 1 {
        console.line("Scanning through the blockchain to find transactions that belong to you.");
        console.line("Please wait, this will take some time.");
    } else {
        console.line("Scanning through the blockchain to find any new transactions you received");
        console.line("whilst your wallet wasn't open.");
        console.line("Please wait, this may take some time.");
    }
    console.blank();

    info!(wallet_height, local_height, remote_height, "sync started");

    let mut polls: u32 = 1;
    let mut stalls: u32 = 0;

    while wallet_height < local_height {
        info.wallet.update_internal_cache()?;
        local_height = node.last_local_block_height()?;

        console.emit(&wallet_height.to_string(), Some(Severity::Success));
        console.emit(" of ", None);
        console.emit(&local_height.to_string(), Some(Severity::Information));
        console.end_line();

        let new_height = info.wallet.block_count()?;

        // Periodic save so an interrupted scan keeps its progress.
        if options.save_every != 0 && polls % options.save_every == 0 {
            info.wallet.save()?;
        }

        let pause = if new_height == wallet_height {
            stalls = stalls.saturating_add(1);
            if options.stall_limit != 0 && stalls >= options.stall_limit {
                warn!(wallet_height, stalls, "wallet height not moving");
                console.warning(&format!("Syncing may be stuck. Try restarting {}d.", TICKER));
                console.warning("If this persists, ask for support.");
                // Saving restarts the engine's synchronizer, which often unsticks it.
                info.wallet.save()?;
                stalls = 0;
            }
            options.stall_interval
        } else {
            stalls = 0;
            wallet_height = new_height;
            transaction_count = announce_new_transactions(console, info, transaction_count)?;
            options.poll_interval
        };

        polls = polls.wrapping_add(1);
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }

    console.blank();
    console.success("Finished scanning blockchain!");

    // Keep the progress if the user force closes.
    info.wallet.save()?;
    info.known_transaction_count = transaction_count;
    info!(wallet_height, transactions = transaction_count, "sync finished");

    Ok(())
}

fn announce_new_transactions(console: &mut dyn Console, info: &WalletInfo, known: usize) -> WalletResult<usize> {
    let count = info.wallet.transaction_count()?;
    for index in known..count {
        let tx = info.wallet.transaction(index)?;
        if tx.is_fusion() {
            continue;
        }
        debug!(hash = %tx.hash, amount = tx.total_amount, "new transaction");
        console.blank();
        console.information("New transaction found!");
        console.blank();
        if tx.is_outgoing() {
            print_outgoing_transfer(console, &tx);
        } else {
            print_incoming_transfer(console, &tx);
        }
    }
    Ok(count)
}

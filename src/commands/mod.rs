//! Command handlers
//!
//! Each handler is a stateless function of its inputs: it reads the wallet and
//! node handles, renders to the console and returns. Accessor failures propagate
//! to the caller unchanged.
//!
//! | Command | Handler |
//! |---------|---------|
//! | `help` | [`help`] |
//! | `balance` | [`balance`] |
//! | `bc_height` | [`blockchain_height`] |
//! | `export_keys` | [`export_keys`] → [`print_private_keys`] |
//! | `reset` | [`reset`] → [`crate::sync::sync_wallet`] |
//! | `address` / `save` / `exit` | [`address`], [`save`], [`exit`] |
//! | `*_transfers` | [`list_transfers`] |

mod transfers;

pub use transfers::{list_transfers, print_incoming_transfer, print_outgoing_transfer};

use crate::auth::{confirm_password, PasswordPrompt};
use crate::console::{Console, Severity};
use crate::core::amount::{format_amount, TICKER};
use crate::core::menu;
use crate::error::WalletResult;
use crate::node::Node;
use crate::sync::{sync_wallet, SyncOptions};
use crate::wallet::{keys_are_deterministic, lock, SharedWalletInfo, Wallet};
use tracing::{debug, info};

/// Wallet height lags node height; a gap below this many blocks is not reported.
pub const SCAN_BUFFER: u64 = 1000;

fn still_scanning(wallet: u32, remote: u32) -> bool {
    u64::from(wallet) + SCAN_BUFFER < u64::from(remote)
}

fn wallet_caught_up(wallet: u32, remote: u32) -> bool {
    u64::from(wallet) + SCAN_BUFFER > u64::from(remote)
}

pub fn help(console: &mut dyn Console, view_only: bool) {
    console.line("Available commands:");
    for (name, description) in menu::ALWAYS {
        console.emit_padded(name, menu::COLUMN, Some(Severity::Success));
        console.line(description);
    }

    if view_only {
        console.information(&format!(
            "Please note you are using a view only wallet, and so cannot transfer {}.",
            TICKER
        ));
    } else {
        for (name, description) in menu::SEND_ONLY {
            console.emit_padded(name, menu::COLUMN, Some(Severity::Success));
            console.line(description);
        }
    }
}

pub fn balance(console: &mut dyn Console, node: &dyn Node, wallet: &dyn Wallet, view_only: bool) -> WalletResult<()> {
    let unconfirmed = wallet.pending_balance()?;
    let confirmed = wallet.actual_balance()?;
    let total = unconfirmed.saturating_add(confirmed);

    let (local, remote) = node.heights()?;
    let wallet_height = wallet.block_count()?;

    console.emit("Available balance: ", None);
    console.success(&format_amount(confirmed));
    console.emit("Locked (unconfirmed) balance: ", None);
    console.warning(&format_amount(unconfirmed));
    console.emit("Total balance: ", None);
    console.information(&format_amount(total));

    if view_only {
        console.blank();
        console.information(
            "Please note that view only wallets can only track incoming \
             transactions, and so your wallet balance may appear inflated.",
        );
    }

    if local < remote {
        console.blank();
        console.information("Your daemon is not fully synced with the network!");
        console.line("Your balance may be incorrect until you are fully synced!");
    } else if still_scanning(wallet_height, remote) {
        console.blank();
        console.information("The blockchain is still being scanned for your transactions.");
        console.line("Balances might be incorrect whilst this is ongoing.");
    }

    Ok(())
}

pub fn blockchain_height(console: &mut dyn Console, node: &dyn Node, wallet: &dyn Wallet) -> WalletResult<()> {
    let (local, remote) = node.heights()?;
    let wallet_height = wallet.block_count()?;

    // How far the wallet has walked the chain looking for our transactions.
    console.emit("Wallet blockchain height: ", None);
    let style = if wallet_caught_up(wallet_height, remote) { Severity::Success } else { Severity::Warning };
    console.emit(&wallet_height.to_string(), Some(style));
    console.end_line();

    console.emit("Local blockchain height: ", None);
    let style = if local == remote { Severity::Success } else { Severity::Warning };
    console.emit(&local.to_string(), Some(style));
    console.end_line();

    console.emit("Network blockchain height: ", None);
    console.success(&remote.to_string());

    if local == 0 && remote == 0 {
        console.warning(&format!("Uh oh, it looks like you don't have {}d open!", TICKER));
    } else if still_scanning(wallet_height, remote) && local == remote {
        console.information(
            "You are synced with the network, but the blockchain is still being \
             scanned for your transactions.",
        );
        console.line("Balances might be incorrect whilst this is ongoing.");
    } else if local == remote {
        console.success("Yay! You are synced!");
    } else {
        console.warning("Be patient, you are still syncing with the network!");
    }

    Ok(())
}

/// Confirm the wallet password, then print the private keys. A failed
/// confirmation returns without printing anything.
pub fn export_keys(
    console: &mut dyn Console,
    prompt: &mut dyn PasswordPrompt,
    info: &SharedWalletInfo,
    attempts: u32,
) -> WalletResult<()> {
    let guard = lock(info)?;
    if !confirm_password(console, prompt, &guard.password, attempts)? {
        return Ok(());
    }
    print_private_keys(console, &*guard.wallet, guard.view_only)
}

pub fn print_private_keys(console: &mut dyn Console, wallet: &dyn Wallet, view_only: bool) -> WalletResult<()> {
    let private_view = wallet.view_secret_key()?;

    if view_only {
        console.success("Private view key:");
        console.success(&private_view.to_hex());
        return Ok(());
    }

    let private_spend = wallet.spend_secret_key()?;

    // Not shown to the user.
    let deterministic = keys_are_deterministic(&private_spend, &private_view);
    debug!(deterministic, "checked view key derivation");

    console.success("Private spend key:");
    console.success(&private_spend.to_hex());
    console.blank();
    console.success("Private view key:");
    console.success(&private_view.to_hex());

    Ok(())
}

/// Drop every cached transaction, reopen the wallet and rescan the chain.
///
/// Order matters: the cache must be gone before the reload, and the reload must
/// finish before the resync starts.
pub fn reset(console: &mut dyn Console, node: &dyn Node, info: &SharedWalletInfo, options: &SyncOptions) -> WalletResult<()> {
    let mut guard = lock(info)?;
    console.information("Resetting wallet...");

    guard.known_transaction_count = 0;

    // Leaves the wallet uninitialised until the load below.
    guard.wallet.clear_cache_and_shutdown()?;

    let file = guard.file_name.clone();
    let password = guard.password.clone();
    guard.wallet.load(&file, &password)?;
    info!(file = %file.display(), "wallet reloaded, rescanning");

    sync_wallet(console, node, &mut guard, options)
}

pub fn address(console: &mut dyn Console, wallet: &dyn Wallet) -> WalletResult<()> {
    console.success(&wallet.address()?);
    Ok(())
}

pub fn save(console: &mut dyn Console, wallet: &mut dyn Wallet) -> WalletResult<()> {
    console.information("Saving.");
    wallet.save()?;
    console.information("Saved.");
    Ok(())
}

pub fn exit(console: &mut dyn Console, wallet: &mut dyn Wallet) -> WalletResult<()> {
    console.information("Saving wallet file...");
    wallet.save()?;
    console.success("Bye.");
    Ok(())
}

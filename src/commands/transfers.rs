//! Transfer listings: `incoming_transfers`, `outgoing_transfers`, `list_transfers`

use crate::console::{Console, Severity};
use crate::core::amount::format_amount;
use crate::error::WalletResult;
use crate::wallet::{Wallet, WalletTransaction};
use chrono::DateTime;

fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn print_location(console: &mut dyn Console, tx: &WalletTransaction, severity: Severity) {
    // Unconfirmed transactions have neither a block nor a time yet.
    if tx.timestamp != 0 {
        console.emit(&format!("Block height: {}", tx.block_height), Some(severity));
        console.end_line();
        console.emit(&format!("Timestamp: {}", format_timestamp(tx.timestamp)), Some(severity));
        console.end_line();
    }
}

fn print_payment_id(console: &mut dyn Console, tx: &WalletTransaction, severity: Severity) {
    if let Some(id) = tx.payment_id.as_deref().filter(|id| !id.is_empty()) {
        console.emit(&format!("Payment ID: {}", id), Some(severity));
        console.end_line();
    }
}

pub fn print_incoming_transfer(console: &mut dyn Console, tx: &WalletTransaction) {
    console.success("Incoming transfer:");
    console.success(&format!("Hash: {}", tx.hash));
    print_location(console, tx, Severity::Success);
    console.success(&format!("Amount: {}", format_amount(tx.total_amount.unsigned_abs())));
    print_payment_id(console, tx, Severity::Success);
    console.blank();
}

pub fn print_outgoing_transfer(console: &mut dyn Console, tx: &WalletTransaction) {
    let total_spent = tx.total_amount.unsigned_abs();
    console.warning("Outgoing transfer:");
    console.warning(&format!("Hash: {}", tx.hash));
    print_location(console, tx, Severity::Warning);
    console.warning(&format!("Spent: {}", format_amount(total_spent.saturating_sub(tx.fee))));
    console.warning(&format!("Fee: {}", format_amount(tx.fee)));
    console.warning(&format!("Total Spent: {}", format_amount(total_spent)));
    print_payment_id(console, tx, Severity::Warning);
    console.blank();
}

/// Print every incoming and/or outgoing transfer, then the running totals.
/// Fusion transactions are skipped.
pub fn list_transfers(console: &mut dyn Console, wallet: &dyn Wallet, incoming: bool, outgoing: bool) -> WalletResult<()> {
    let mut total_received: u64 = 0;
    let mut total_spent: u64 = 0;

    for index in 0..wallet.transaction_count()? {
        let tx = wallet.transaction(index)?;
        if tx.is_outgoing() && outgoing {
            print_outgoing_transfer(console, &tx);
            total_spent = total_spent.saturating_add(tx.total_amount.unsigned_abs());
        } else if tx.is_incoming() && incoming {
            print_incoming_transfer(console, &tx);
            total_received = total_received.saturating_add(tx.total_amount.unsigned_abs());
        }
    }

    if incoming {
        console.success(&format!("Total received: {}", format_amount(total_received)));
    }
    if outgoing {
        console.warning(&format!("Total spent: {}", format_amount(total_spent)));
    }

    Ok(())
}

//! Command names and help descriptions
//!
//! Centralized registry for every command the shell understands.

pub const HELP: &str = "help";
pub const RESET: &str = "reset";
pub const BC_HEIGHT: &str = "bc_height";
pub const BALANCE: &str = "balance";
pub const EXPORT_KEYS: &str = "export_keys";
pub const ADDRESS: &str = "address";
pub const EXIT: &str = "exit";
pub const SAVE: &str = "save";
pub const INCOMING_TRANSFERS: &str = "incoming_transfers";
pub const OUTGOING_TRANSFERS: &str = "outgoing_transfers";
pub const LIST_TRANSFERS: &str = "list_transfers";
pub const QUICK_OPTIMIZE: &str = "quick_optimize";
pub const FULL_OPTIMIZE: &str = "full_optimize";
pub const TRANSFER: &str = "transfer";

/// Width of the command column in the help menu.
pub const COLUMN: usize = 25;

/// Listed for every wallet.
pub const ALWAYS: &[(&str, &str)] = &[
    (HELP, "List this help message"),
    (RESET, "Discard cached data and recheck for transactions"),
    (BC_HEIGHT, "Show the blockchain height"),
    (BALANCE, "Display how much BLOC you have"),
    (EXPORT_KEYS, "Export your private keys"),
    (ADDRESS, "Displays your payment address"),
    (EXIT, "Exit and save your wallet"),
    (SAVE, "Save your wallet state"),
    (INCOMING_TRANSFERS, "Show incoming transfers"),
];

/// Listed only when the wallet holds a spend key.
pub const SEND_ONLY: &[(&str, &str)] = &[
    (OUTGOING_TRANSFERS, "Show outgoing transfers"),
    (LIST_TRANSFERS, "Show all transfers"),
    (QUICK_OPTIMIZE, "Quickly optimize your wallet to send large amounts"),
    (FULL_OPTIMIZE, "Fully optimize your wallet to send large amounts"),
    (TRANSFER, "Send BLOC to someone"),
];

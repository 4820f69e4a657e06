//! blocwallet: interactive command layer for a BLOC (CryptoNote) wallet.
//!
//! # Architecture
//!
//! ```text
//! blocwallet (binary)
//!   │
//!   └── Shell (read line → Command → handler)
//!         ├── Console  ← TerminalConsole | CaptureConsole | LogConsole
//!         ├── Node     ← DaemonNode (GET /getinfo)      | StaticNode
//!         ├── Wallet   ← WalletdClient (walletd JSON-RPC) via SharedWalletInfo
//!         └── PasswordPrompt ← TerminalPrompt | ScriptedPrompt
//! ```
//!
//! Handlers own no state. They read the wallet and node handles, render to a
//! [`Console`] and return.
//!
//! # Commands
//!
//! | Command | Handler | Description |
//! |---------|---------|-------------|
//! | help | [`commands::help`] | List commands (send commands hidden for view-only wallets) |
//! | balance | [`commands::balance`] | Available, locked and total balance |
//! | bc_height | [`commands::blockchain_height`] | Wallet, local and network heights |
//! | export_keys | [`commands::export_keys`] | Confirm password, print private keys |
//! | reset | [`commands::reset`] | Clear cache, reload, rescan |
//! | address / save / exit | [`commands::address`], [`commands::save`], [`commands::exit`] | |
//! | incoming/outgoing/list_transfers | [`commands::list_transfers`] | Transfer history |
//!
//! # Features
//!
//! - `rpc` (default) - walletd and daemon HTTP backends, the `blocwallet` binary
//!
//! # Usage
//!
//! ```ignore
//! use blocwallet::{CaptureConsole, ScriptedPrompt, Shell, StaticNode, WalletInfo};
//!
//! let info = WalletInfo::new(Box::new(my_wallet), "main.wallet", "hunter2").into_shared();
//! let mut shell = Shell::new(CaptureConsole::new(), StaticNode::new(100, 100), info, ScriptedPrompt::default());
//! shell.handle_line("balance");
//! ```

// =============================================================================
// Command layer
// =============================================================================
pub mod auth;
pub mod commands;
pub mod console;
pub mod core;
pub mod repl;
pub mod sync;

// =============================================================================
// Handles and ambient
// =============================================================================
pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod wallet;

#[cfg(feature = "rpc")]
pub mod rpc;

// =============================================================================
// Re-exports
// =============================================================================
pub use crate::auth::{confirm_password, PasswordPrompt, ScriptedPrompt, TerminalPrompt};
pub use crate::config::WalletConfig;
pub use crate::console::{CaptureConsole, Console, LogConsole, Severity, TerminalConsole};
pub use crate::core::amount::{format_amount, TICKER};
pub use crate::error::{WalletError, WalletResult};
pub use crate::node::{Node, StaticNode};
pub use crate::repl::{Command, Flow, Shell};
pub use crate::sync::{sync_wallet, SyncOptions};
pub use crate::wallet::{SecretKey, SharedWalletInfo, Wallet, WalletInfo, WalletTransaction};

#[cfg(feature = "rpc")]
pub use crate::rpc::{DaemonNode, WalletdClient};

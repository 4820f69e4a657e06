//! Interactive shell: parse a command name, run its handler, repeat.

use crate::auth::PasswordPrompt;
use crate::commands;
use crate::console::Console;
use crate::core::amount::TICKER;
use crate::core::menu;
use crate::error::WalletResult;
use crate::node::Node;
use crate::sync::SyncOptions;
use crate::wallet::{lock, SharedWalletInfo};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Reset,
    BcHeight,
    Balance,
    ExportKeys,
    Address,
    Exit,
    Save,
    IncomingTransfers,
    OutgoingTransfers,
    ListTransfers,
    QuickOptimize,
    FullOptimize,
    Transfer,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Help => menu::HELP,
            Command::Reset => menu::RESET,
            Command::BcHeight => menu::BC_HEIGHT,
            Command::Balance => menu::BALANCE,
            Command::ExportKeys => menu::EXPORT_KEYS,
            Command::Address => menu::ADDRESS,
            Command::Exit => menu::EXIT,
            Command::Save => menu::SAVE,
            Command::IncomingTransfers => menu::INCOMING_TRANSFERS,
            Command::OutgoingTransfers => menu::OUTGOING_TRANSFERS,
            Command::ListTransfers => menu::LIST_TRANSFERS,
            Command::QuickOptimize => menu::QUICK_OPTIMIZE,
            Command::FullOptimize => menu::FULL_OPTIMIZE,
            Command::Transfer => menu::TRANSFER,
        }
    }

    /// Commands that need the spend key.
    pub fn requires_spend_key(&self) -> bool {
        matches!(
            self,
            Command::OutgoingTransfers
                | Command::ListTransfers
                | Command::QuickOptimize
                | Command::FullOptimize
                | Command::Transfer
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command: {}, use {} command to list all commands.", self.0, menu::HELP)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            menu::HELP => Command::Help,
            menu::RESET => Command::Reset,
            menu::BC_HEIGHT => Command::BcHeight,
            menu::BALANCE => Command::Balance,
            menu::EXPORT_KEYS => Command::ExportKeys,
            menu::ADDRESS => Command::Address,
            menu::EXIT => Command::Exit,
            menu::SAVE => Command::Save,
            menu::INCOMING_TRANSFERS => Command::IncomingTransfers,
            menu::OUTGOING_TRANSFERS => Command::OutgoingTransfers,
            menu::LIST_TRANSFERS => Command::ListTransfers,
            menu::QUICK_OPTIMIZE => Command::QuickOptimize,
            menu::FULL_OPTIMIZE => Command::FullOptimize,
            menu::TRANSFER => Command::Transfer,
            other => return Err(UnknownCommand(other.to_string())),
        })
    }
}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<C: Console, N: Node, P: PasswordPrompt> {
    console: C,
    node: N,
    info: SharedWalletInfo,
    prompt: P,
    sync: SyncOptions,
    password_attempts: u32,
}

impl<C: Console, N: Node, P: PasswordPrompt> Shell<C, N, P> {
    pub fn new(console: C, node: N, info: SharedWalletInfo, prompt: P) -> Self {
        Self { console, node, info, prompt, sync: SyncOptions::default(), password_attempts: 3 }
    }

    pub fn with_sync_options(mut self, options: SyncOptions) -> Self { self.sync = options; self }
    pub fn with_password_attempts(mut self, attempts: u32) -> Self { self.password_attempts = attempts.max(1); self }

    pub fn console(&self) -> &C { &self.console }
    pub fn console_mut(&mut self) -> &mut C { &mut self.console }
    pub fn info(&self) -> &SharedWalletInfo { &self.info }

    pub fn into_console(self) -> C { self.console }

    /// `[BLOC bXXXX]: ` built from the first characters of the address.
    pub fn prompt_text(&self) -> WalletResult<String> {
        let guard = lock(&self.info)?;
        let address = guard.wallet.address()?;
        let short: String = address.chars().take(5).collect();
        Ok(format!("[{} {}]: ", TICKER, short))
    }

    /// Run one command. Handler errors come back to the caller.
    pub fn dispatch(&mut self, command: Command) -> WalletResult<Flow> {
        let view_only = lock(&self.info)?.view_only;
        debug!(%command, view_only, "dispatch");

        if view_only && command.requires_spend_key() {
            self.console.warning("This command is not available in view only wallets.");
            return Ok(Flow::Continue);
        }

        let console: &mut dyn Console = &mut self.console;
        match command {
            Command::Help => commands::help(console, view_only),
            Command::Reset => commands::reset(console, &self.node, &self.info, &self.sync)?,
            Command::BcHeight => {
                let guard = lock(&self.info)?;
                commands::blockchain_height(console, &self.node, &*guard.wallet)?;
            }
            Command::Balance => {
                let guard = lock(&self.info)?;
                commands::balance(console, &self.node, &*guard.wallet, view_only)?;
            }
            Command::ExportKeys => {
                commands::export_keys(console, &mut self.prompt, &self.info, self.password_attempts)?
            }
            Command::Address => {
                let guard = lock(&self.info)?;
                commands::address(console, &*guard.wallet)?;
            }
            Command::Save => {
                let mut guard = lock(&self.info)?;
                commands::save(console, &mut *guard.wallet)?;
            }
            Command::Exit => {
                let mut guard = lock(&self.info)?;
                commands::exit(console, &mut *guard.wallet)?;
                return Ok(Flow::Exit);
            }
            Command::IncomingTransfers => {
                let guard = lock(&self.info)?;
                commands::list_transfers(console, &*guard.wallet, true, false)?;
            }
            Command::OutgoingTransfers => {
                let guard = lock(&self.info)?;
                commands::list_transfers(console, &*guard.wallet, false, true)?;
            }
            Command::ListTransfers => {
                let guard = lock(&self.info)?;
                commands::list_transfers(console, &*guard.wallet, true, true)?;
            }
            Command::QuickOptimize | Command::FullOptimize | Command::Transfer => {
                console.warning(&format!(
                    "{} is not available from this command line, use your wallet service to send {}.",
                    command, TICKER
                ));
            }
        }
        Ok(Flow::Continue)
    }

    /// Handle one raw input line.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                self.console.warning(&e.to_string());
                return Flow::Continue;
            }
        };
        match self.dispatch(command) {
            Ok(flow) => flow,
            Err(e) => {
                error!(%command, error = %e, "command failed");
                self.console.warning(&format!("{} failed: {}", command, e));
                Flow::Continue
            }
        }
    }

    /// Read commands until `exit` or end of input. End of input saves like `exit`.
    pub fn run<R: BufRead>(&mut self, input: R, mut show_prompt: impl FnMut(&mut C, &str)) -> WalletResult<()> {
        let prompt = self.prompt_text()?;
        let mut lines = input.lines();
        loop {
            show_prompt(&mut self.console, &prompt);
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    self.console.blank();
                    self.dispatch(Command::Exit)?;
                    return Ok(());
                }
            };
            if self.handle_line(&line) == Flow::Exit {
                return Ok(());
            }
        }
    }
}

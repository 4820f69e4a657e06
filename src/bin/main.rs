//! blocwallet CLI - interactive shell over a walletd container
//!
//!   blocwallet --container main.wallet            → prompt for password, sync, open shell
//!   blocwallet -f main.wallet --view-only         → hide send commands
//!   blocwallet -d http://node:2086 -w http://127.0.0.1:8070 -f main.wallet
//!
//! Settings come from flags, then `BLOCWALLET_*` variables (a `.env` file is
//! read first), then a JSON config file, then defaults.

use anyhow::{anyhow, Context};
use blocwallet::auth::{PasswordPrompt, TerminalPrompt};
use blocwallet::config::{load_dotenv, WalletConfig};
use blocwallet::console::{Console, TerminalConsole};
use blocwallet::core::menu;
use blocwallet::logging::init_logging;
use blocwallet::{sync_wallet, DaemonNode, Shell, WalletInfo, WalletdClient};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::Zeroizing;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("blocwallet {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = run(&opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[derive(Default)]
struct ParsedArgs {
    config: Option<PathBuf>,
    daemon: Option<String>,
    walletd: Option<String>,
    rpc_password: Option<String>,
    container: Option<PathBuf>,
    view_only: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let loaded = load_dotenv(Path::new(".env"));
        if loaded > 0 {
            debug!(loaded, "read variables from .env");
        }

        let mut opts = ParsedArgs::default();
        let mut i = 0;

        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--view-only" => opts.view_only = true,
                "--config" | "-c" => {
                    if let Some(v) = value {
                        opts.config = Some(PathBuf::from(v));
                        i += 1;
                    }
                }
                "--daemon" | "-d" => {
                    if let Some(v) = value {
                        opts.daemon = Some(v);
                        i += 1;
                    }
                }
                "--walletd" | "-w" => {
                    if let Some(v) = value {
                        opts.walletd = Some(v);
                        i += 1;
                    }
                }
                "--rpc-password" => {
                    if let Some(v) = value {
                        opts.rpc_password = Some(v);
                        i += 1;
                    }
                }
                "--container" | "-f" => {
                    if let Some(v) = value {
                        opts.container = Some(PathBuf::from(v));
                        i += 1;
                    }
                }
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        opts
    }

    /// Flags win over everything loaded before them.
    fn apply(&self, mut config: WalletConfig) -> WalletConfig {
        if let Some(url) = &self.daemon {
            config = config.with_daemon(url.clone());
        }
        if let Some(url) = &self.walletd {
            config = config.with_walletd(url.clone());
        }
        if let Some(pw) = &self.rpc_password {
            config = config.with_rpc_password(pw.clone());
        }
        if let Some(path) = &self.container {
            config = config.with_container(path.clone());
        }
        if self.view_only {
            config = config.with_view_only(true);
        }
        config
    }
}

fn print_usage() {
    println!(
        r#"blocwallet - BLOC wallet shell

USAGE:
    blocwallet --container <file> [options]

OPTIONS:
    --container, -f <file>   Wallet container opened by walletd (env: BLOCWALLET_CONTAINER)
    --daemon, -d <url>       Daemon URL (default: http://127.0.0.1:2086, env: BLOCWALLET_DAEMON)
    --walletd, -w <url>      walletd URL (default: http://127.0.0.1:8070, env: BLOCWALLET_WALLETD)
    --rpc-password <pw>      Wallet password, also sent as the walletd RPC password.
                             Skips the prompt (env: BLOCWALLET_RPC_PASSWORD)
    --view-only              Treat the wallet as view only
    --config, -c <file>      JSON config file (default: ./.blocwallet.json)
    --version, -V            Print version
    --help, -h               Print this message

LOGGING:
    RUST_LOG=debug           Log filter (default: warn), written to stderr
    BLOCWALLET_LOG_JSON=1    JSON log lines

Type "help" inside the shell to list wallet commands.
"#
    );
}

fn run(opts: &ParsedArgs) -> anyhow::Result<()> {
    let config = opts.apply(WalletConfig::load(opts.config.as_deref())?);
    config.validate()?;
    debug!(?config, "configuration");

    let container = config
        .container
        .clone()
        .ok_or_else(|| anyhow!("no wallet container given"))?;
    let timeout = config.request_timeout();

    let node = DaemonNode::new(config.daemon_url.clone(), timeout)?;
    let wallet = WalletdClient::new(config.walletd_url.clone(), container.clone(), timeout)?;

    let mut prompt = TerminalPrompt;
    let password = match &config.rpc_password {
        Some(pw) => Zeroizing::new(pw.clone()),
        None => prompt.read_password("Enter password: ")?,
    };
    let wallet_info = WalletInfo::open(Box::new(wallet), container.clone(), password.as_str())
        .with_context(|| format!("could not open {} through walletd at {}", container.display(), config.walletd_url))?;

    let view_only = config.view_only || wallet_info.wallet.spend_secret_key()?.is_null();
    info!(container = %container.display(), view_only, "wallet opened");

    let mut console = TerminalConsole::stdout();
    let mut wallet_info = wallet_info.with_view_only(view_only);
    let options = config.sync_options();

    sync_wallet(&mut console, &node, &mut wallet_info, &options)?;

    console.blank();
    console.information(&format!("Type \"{}\" to see the list of available commands.", menu::HELP));

    let mut shell = Shell::new(console, node, wallet_info.into_shared(), prompt)
        .with_sync_options(options)
        .with_password_attempts(config.password_attempts);

    let stdin = io::stdin();
    shell.run(stdin.lock(), |console, text| console.prompt(text))?;
    Ok(())
}

//! WalletInfo - the open wallet plus what is needed to reopen it

use super::Wallet;
use crate::error::{WalletError, WalletResult};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use zeroize::Zeroizing;

pub struct WalletInfo {
    pub wallet: Box<dyn Wallet + Send>,
    pub file_name: PathBuf,
    pub password: Zeroizing<String>,
    /// Transactions already announced to the user.
    pub known_transaction_count: usize,
    pub view_only: bool,
}

pub type SharedWalletInfo = Arc<Mutex<WalletInfo>>;

impl WalletInfo {
    pub fn new(wallet: Box<dyn Wallet + Send>, file_name: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            wallet,
            file_name: file_name.into(),
            password: Zeroizing::new(password.into()),
            known_transaction_count: 0,
            view_only: false,
        }
    }

    /// Load `file` with `password` and keep the password only once the
    /// wallet has accepted it. `export_keys` confirms against this value.
    pub fn open(
        mut wallet: Box<dyn Wallet + Send>,
        file_name: impl Into<PathBuf>,
        password: impl Into<String>,
    ) -> WalletResult<Self> {
        let file_name = file_name.into();
        let password = Zeroizing::new(password.into());
        wallet.load(&file_name, &password)?;
        Ok(Self {
            wallet,
            file_name,
            password,
            known_transaction_count: 0,
            view_only: false,
        })
    }

    pub fn with_view_only(mut self, view_only: bool) -> Self { self.view_only = view_only; self }

    pub fn into_shared(self) -> SharedWalletInfo {
        Arc::new(Mutex::new(self))
    }
}

impl fmt::Debug for WalletInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletInfo")
            .field("file_name", &self.file_name)
            .field("known_transaction_count", &self.known_transaction_count)
            .field("view_only", &self.view_only)
            .finish_non_exhaustive()
    }
}

pub fn lock(info: &SharedWalletInfo) -> WalletResult<MutexGuard<'_, WalletInfo>> {
    info.lock().map_err(|_| WalletError::Lock)
}

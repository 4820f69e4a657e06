//! Shared test doubles: an in-memory wallet whose state tests can inspect
//! after handing it to a `WalletInfo`.

#![allow(dead_code)]

use blocwallet::wallet::generate_view_from_spend;
use blocwallet::{SecretKey, Wallet, WalletError, WalletInfo, WalletResult, WalletTransaction};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub const ADDRESS: &str = "abLoCxR8nGcQ7aSv1j5pYwKqT2tGmPzHd9fNvE3uWcYbLkJx4sQ";
pub const PASSWORD: &str = "correct horse";
pub const CONTAINER: &str = "main.wallet";
pub const SPEND_HEX: &str = "0f3a6e1c2b9d8e7f6a5b4c3d2e1f00112233445566778899aabbccddeeff0001";

#[derive(Debug)]
pub struct FakeState {
    pub pending: u64,
    pub actual: u64,
    pub block_count: u32,
    /// Height `update_internal_cache` walks towards.
    pub target_height: u32,
    pub step: u32,
    /// Polls to sit still before moving again.
    pub stall_polls: u32,
    pub view: SecretKey,
    pub spend: SecretKey,
    /// Sorted by block height; visible once the wallet has scanned past it.
    pub transactions: Vec<WalletTransaction>,
    pub shut_down: bool,
    /// Password `load` accepts.
    pub password: String,
    pub fail_load: bool,
    pub calls: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        let spend = SecretKey::from_hex(SPEND_HEX).expect("spend hex");
        let view = generate_view_from_spend(&spend);
        Self {
            pending: 0,
            actual: 0,
            block_count: 0,
            target_height: 0,
            step: 1,
            stall_polls: 0,
            view,
            spend,
            transactions: Vec::new(),
            shut_down: false,
            password: PASSWORD.to_string(),
            fail_load: false,
            calls: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeWallet {
    state: Arc<Mutex<FakeState>>,
}

impl FakeWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(configure: impl FnOnce(&mut FakeState)) -> Self {
        let wallet = Self::default();
        configure(&mut wallet.state());
        wallet
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|c| c.as_str() == name).count()
    }

    pub fn into_info(self) -> WalletInfo {
        WalletInfo::new(Box::new(self), CONTAINER, PASSWORD)
    }

    fn open(&self) -> WalletResult<MutexGuard<'_, FakeState>> {
        let state = self.state();
        if state.shut_down {
            return Err(WalletError::NotInitialised);
        }
        Ok(state)
    }

    fn visible(state: &FakeState) -> Vec<WalletTransaction> {
        state
            .transactions
            .iter()
            .filter(|tx| tx.block_height <= state.block_count)
            .cloned()
            .collect()
    }
}

impl Wallet for FakeWallet {
    fn pending_balance(&self) -> WalletResult<u64> {
        Ok(self.open()?.pending)
    }

    fn actual_balance(&self) -> WalletResult<u64> {
        Ok(self.open()?.actual)
    }

    fn block_count(&self) -> WalletResult<u32> {
        Ok(self.open()?.block_count)
    }

    fn view_secret_key(&self) -> WalletResult<SecretKey> {
        Ok(self.open()?.view.clone())
    }

    fn spend_secret_key(&self) -> WalletResult<SecretKey> {
        let mut state = self.open()?;
        state.calls.push("spend_secret_key".into());
        Ok(state.spend.clone())
    }

    fn address(&self) -> WalletResult<String> {
        self.open()?;
        Ok(ADDRESS.to_string())
    }

    fn transaction_count(&self) -> WalletResult<usize> {
        let state = self.open()?;
        Ok(Self::visible(&state).len())
    }

    fn transaction(&self, index: usize) -> WalletResult<WalletTransaction> {
        let state = self.open()?;
        Self::visible(&state)
            .get(index)
            .cloned()
            .ok_or_else(|| WalletError::Decode(format!("no transaction {}", index)))
    }

    fn update_internal_cache(&mut self) -> WalletResult<()> {
        let mut state = self.open()?;
        if state.stall_polls > 0 {
            state.stall_polls -= 1;
            return Ok(());
        }
        let next = state.block_count.saturating_add(state.step);
        state.block_count = next.min(state.target_height);
        Ok(())
    }

    fn save(&mut self) -> WalletResult<()> {
        self.open()?.calls.push("save".into());
        Ok(())
    }

    fn clear_cache_and_shutdown(&mut self) -> WalletResult<()> {
        let mut state = self.open()?;
        state.calls.push("clear".into());
        state.block_count = 0;
        state.shut_down = true;
        Ok(())
    }

    fn load(&mut self, file: &Path, password: &str) -> WalletResult<()> {
        let mut state = self.state();
        state.calls.push(format!("load:{}:{}", file.display(), password));
        if state.fail_load {
            return Err(WalletError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "container missing")));
        }
        if password != state.password {
            return Err(WalletError::WrongPassword);
        }
        state.shut_down = false;
        Ok(())
    }
}

pub fn incoming(hash: &str, amount: i64, height: u32) -> WalletTransaction {
    WalletTransaction {
        hash: hash.into(),
        total_amount: amount,
        fee: 0,
        block_height: height,
        timestamp: 1_530_000_000 + u64::from(height) * 120,
        payment_id: None,
    }
}

pub fn outgoing(hash: &str, amount: i64, fee: u64, height: u32) -> WalletTransaction {
    WalletTransaction { total_amount: -amount, fee, ..incoming(hash, 0, height) }
}

//! WalletdClient - wallet handle backed by a walletd JSON-RPC service
//!
//! The service owns the container. Its RPC password is the wallet password:
//! [`Wallet::load`] only succeeds once walletd has accepted it on an
//! authenticated `getStatus` and rejected the same call without it.
//!
//! | Trait method | RPC method |
//! |--------------|------------|
//! | `pending_balance` / `actual_balance` | `getBalance` |
//! | `block_count` | `getStatus` |
//! | `view_secret_key` | `getViewKey` |
//! | `spend_secret_key` | `getSpendKeys` |
//! | `address` | `getAddresses` |
//! | `transaction_count` / `transaction` | `getTransactions` |
//! | `save` | `save` |
//! | `clear_cache_and_shutdown` | `reset` |

use super::{endpoint, field, field_i64, field_str, field_u32, field_u64};
use crate::error::{WalletError, WalletResult};
use crate::wallet::{SecretKey, Wallet, WalletTransaction};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

pub struct WalletdClient {
    client: Client,
    url: String,
    rpc_password: Option<Zeroizing<String>>,
    container: PathBuf,
    next_id: AtomicU64,
    shut_down: bool,
    transactions: Mutex<Vec<WalletTransaction>>,
}

impl WalletdClient {
    pub fn new(url: impl Into<String>, container: impl Into<PathBuf>, timeout: Duration) -> WalletResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            rpc_password: None,
            container: container.into(),
            next_id: AtomicU64::new(1),
            // Unusable until `load` has authenticated.
            shut_down: true,
            transactions: Mutex::new(Vec::new()),
        })
    }

    pub fn container(&self) -> &Path { &self.container }

    fn post(&self, method: &str, params: Value, password: Option<&str>) -> WalletResult<Response> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(id, method, params, password);
        debug!(method, id, authenticated = password.is_some(), "walletd call");
        Ok(self.client.post(endpoint(&self.url, "json_rpc")).json(&body).send()?)
    }

    fn open_call(&self, method: &str, params: Value) -> WalletResult<Value> {
        if self.shut_down {
            return Err(WalletError::NotInitialised);
        }
        let password = self.rpc_password.as_ref().map(|p| p.as_str());
        let response: Value = self.post(method, params, password)?.error_for_status()?.json()?;
        parse_response(response)
    }

    /// Whether walletd answers `getStatus` with `password`. Auth failures
    /// (HTTP 401/403 or a JSON-RPC error) are `Ok(false)`; transport errors
    /// propagate.
    fn accepts(&self, password: Option<&str>) -> WalletResult<bool> {
        let response = self.post("getStatus", json!({}), password)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(false);
        }
        let body: Value = response.error_for_status()?.json()?;
        match parse_response(body) {
            Ok(_) => Ok(true),
            Err(WalletError::Rpc { code, message }) => {
                debug!(code, %message, "walletd rejected getStatus");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn refresh_transactions(&self) -> WalletResult<usize> {
        let block_count = field_u32(&self.open_call("getStatus", json!({}))?, "blockCount")?;
        let result = self.open_call(
            "getTransactions",
            json!({"firstBlockIndex": 0, "blockCount": block_count.max(1)}),
        )?;
        let parsed = parse_transactions(&result)?;
        let count = parsed.len();
        *self.transactions.lock().map_err(|_| WalletError::Lock)? = parsed;
        Ok(count)
    }
}

fn request_body(id: u64, method: &str, params: Value, password: Option<&str>) -> Value {
    let mut body = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    });
    if let Some(password) = password {
        body["password"] = Value::String(password.to_string());
    }
    body
}

fn parse_response(response: Value) -> WalletResult<Value> {
    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        return Err(WalletError::Rpc {
            code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }
    response
        .get("result")
        .cloned()
        .ok_or_else(|| WalletError::Decode("response has neither result nor error".into()))
}

/// Flatten `getTransactions` block items into wallet order.
fn parse_transactions(result: &Value) -> WalletResult<Vec<WalletTransaction>> {
    let items = field(result, "items")?
        .as_array()
        .ok_or_else(|| WalletError::Decode("'items' is not an array".into()))?;

    let mut out = Vec::new();
    for item in items {
        let transactions = field(item, "transactions")?
            .as_array()
            .ok_or_else(|| WalletError::Decode("'transactions' is not an array".into()))?;
        for tx in transactions {
            let payment_id = tx
                .get("paymentId")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            out.push(WalletTransaction {
                hash: field_str(tx, "transactionHash")?.to_string(),
                total_amount: field_i64(tx, "amount")?,
                fee: field_u64(tx, "fee")?,
                block_height: field_u32(tx, "blockIndex")?,
                timestamp: field_u64(tx, "timestamp")?,
                payment_id,
            });
        }
    }
    Ok(out)
}

impl Wallet for WalletdClient {
    fn pending_balance(&self) -> WalletResult<u64> {
        field_u64(&self.open_call("getBalance", json!({}))?, "lockedAmount")
    }

    fn actual_balance(&self) -> WalletResult<u64> {
        field_u64(&self.open_call("getBalance", json!({}))?, "availableBalance")
    }

    fn block_count(&self) -> WalletResult<u32> {
        field_u32(&self.open_call("getStatus", json!({}))?, "blockCount")
    }

    fn view_secret_key(&self) -> WalletResult<SecretKey> {
        let result = self.open_call("getViewKey", json!({}))?;
        SecretKey::from_hex(field_str(&result, "viewSecretKey")?)
    }

    fn spend_secret_key(&self) -> WalletResult<SecretKey> {
        let address = self.address()?;
        let result = self.open_call("getSpendKeys", json!({"address": address}))?;
        SecretKey::from_hex(field_str(&result, "spendSecretKey")?)
    }

    fn address(&self) -> WalletResult<String> {
        let result = self.open_call("getAddresses", json!({}))?;
        field(&result, "addresses")?
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| WalletError::Decode("container holds no address".into()))
    }

    fn transaction_count(&self) -> WalletResult<usize> {
        self.refresh_transactions()
    }

    fn transaction(&self, index: usize) -> WalletResult<WalletTransaction> {
        if let Some(tx) = self.transactions.lock().map_err(|_| WalletError::Lock)?.get(index) {
            return Ok(tx.clone());
        }
        self.refresh_transactions()?;
        self.transactions
            .lock()
            .map_err(|_| WalletError::Lock)?
            .get(index)
            .cloned()
            .ok_or_else(|| WalletError::Decode(format!("no transaction at index {}", index)))
    }

    fn save(&mut self) -> WalletResult<()> {
        self.open_call("save", json!({}))?;
        Ok(())
    }

    fn clear_cache_and_shutdown(&mut self) -> WalletResult<()> {
        self.open_call("reset", json!({}))?;
        self.transactions.lock().map_err(|_| WalletError::Lock)?.clear();
        self.shut_down = true;
        info!(container = %self.container.display(), "walletd cache cleared");
        Ok(())
    }

    /// The service reopens its own container; this checks it is the one asked
    /// for and that `password` is what walletd authenticates with.
    fn load(&mut self, file: &Path, password: &str) -> WalletResult<()> {
        if file != self.container.as_path() {
            return Err(WalletError::ContainerMismatch {
                expected: self.container.display().to_string(),
                requested: file.display().to_string(),
            });
        }
        if password.is_empty() {
            return Err(WalletError::WrongPassword);
        }
        if self.accepts(None)? {
            return Err(WalletError::PasswordNotVerifiable);
        }
        if !self.accepts(Some(password))? {
            warn!(container = %self.container.display(), "walletd rejected the wallet password");
            return Err(WalletError::WrongPassword);
        }
        self.rpc_password = Some(Zeroizing::new(password.to_string()));
        self.shut_down = false;
        Ok(())
    }
}

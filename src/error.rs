//! Wallet errors

use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

/// Errors surfaced by the wallet/node handles and the command layer.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Wallet is not initialised, load it first")]
    NotInitialised,

    #[error("Wallet container mismatch: service has {expected}, asked for {requested}")]
    ContainerMismatch { expected: String, requested: String },

    #[error("Password prompt failed: {0}")]
    Prompt(String),

    #[error("Incorrect wallet password")]
    WrongPassword,

    #[error("Wallet service accepts unauthenticated requests, so the password cannot be verified")]
    PasswordNotVerifiable,

    #[error("Wallet lock poisoned")]
    Lock,

    #[error("Invalid secret key: {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Decode(e.to_string())
    }
}

#[cfg(feature = "rpc")]
impl From<reqwest::Error> for WalletError {
    fn from(e: reqwest::Error) -> Self {
        WalletError::Http(e.to_string())
    }
}

//! RPC backends for the wallet and node handles
//!
//! ```text
//! Shell
//!   ├── Node   ← DaemonNode     GET  {daemon}/getinfo
//!   └── Wallet ← WalletdClient  POST {walletd}/json_rpc
//! ```

mod daemon;
mod walletd;

#[cfg(test)]
mod test_server;

pub use daemon::{DaemonInfo, DaemonNode};
pub use walletd::WalletdClient;

use crate::error::{WalletError, WalletResult};
use serde_json::Value;

fn field<'a>(value: &'a Value, key: &str) -> WalletResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| WalletError::Decode(format!("missing field '{}'", key)))
}

fn field_u64(value: &Value, key: &str) -> WalletResult<u64> {
    field(value, key)?
        .as_u64()
        .ok_or_else(|| WalletError::Decode(format!("field '{}' is not an unsigned integer", key)))
}

fn field_u32(value: &Value, key: &str) -> WalletResult<u32> {
    u32::try_from(field_u64(value, key)?)
        .map_err(|_| WalletError::Decode(format!("field '{}' does not fit in 32 bits", key)))
}

fn field_i64(value: &Value, key: &str) -> WalletResult<i64> {
    field(value, key)?
        .as_i64()
        .ok_or_else(|| WalletError::Decode(format!("field '{}' is not an integer", key)))
}

fn field_str<'a>(value: &'a Value, key: &str) -> WalletResult<&'a str> {
    field(value, key)?
        .as_str()
        .ok_or_else(|| WalletError::Decode(format!("field '{}' is not a string", key)))
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(endpoint("http://127.0.0.1:2086/", "/getinfo"), "http://127.0.0.1:2086/getinfo");
        assert_eq!(endpoint("http://127.0.0.1:8070", "json_rpc"), "http://127.0.0.1:8070/json_rpc");
    }

    #[test]
    fn test_field_helpers() {
        let v = json!({"height": 12, "big": 5_000_000_000u64, "neg": -3, "name": "x"});
        assert_eq!(field_u32(&v, "height").unwrap(), 12);
        assert!(field_u32(&v, "big").is_err());
        assert_eq!(field_i64(&v, "neg").unwrap(), -3);
        assert!(field_u64(&v, "neg").is_err());
        assert_eq!(field_str(&v, "name").unwrap(), "x");
        assert!(matches!(field(&v, "missing"), Err(WalletError::Decode(_))));
    }
}

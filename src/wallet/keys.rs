//! Secret keys and the view-from-spend derivation
//!
//! Deterministic CryptoNote wallets derive the private view key from the
//! private spend key: `view = sc_reduce32(keccak256(spend))`.

use crate::error::{WalletError, WalletResult};
use curve25519_dalek::scalar::Scalar;
use std::fmt;
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 32-byte Ed25519 secret scalar.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    pub const LEN: usize = 32;

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(value: &str) -> WalletResult<Self> {
        let mut raw = hex::decode(value.trim()).map_err(|e| WalletError::InvalidKey(e.to_string()))?;
        if raw.len() != Self::LEN {
            let got = raw.len();
            raw.zeroize();
            return Err(WalletError::InvalidKey(format!("expected {} bytes, got {}", Self::LEN, got)));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        raw.zeroize();
        Ok(Self(bytes))
    }

    /// All-zero key; marks a wallet without a spend key.
    pub fn null() -> Self {
        Self([0u8; 32])
    }

    pub fn is_null(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Private view key a deterministic wallet would hold for `spend`.
pub fn generate_view_from_spend(spend: &SecretKey) -> SecretKey {
    let mut hash = [0u8; 32];
    let mut keccak = Keccak::v256();
    keccak.update(spend.as_bytes());
    keccak.finalize(&mut hash);
    let scalar = Scalar::from_bytes_mod_order(hash);
    hash.zeroize();
    SecretKey(scalar.to_bytes())
}

/// Whether `view` was derived from `spend`.
pub fn keys_are_deterministic(spend: &SecretKey, view: &SecretKey) -> bool {
    generate_view_from_spend(spend) == *view
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEND: &str = "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f00";

    #[test]
    fn test_hex_roundtrip_and_validation() {
        let key = SecretKey::from_hex(SPEND).unwrap();
        assert_eq!(key.to_hex(), SPEND);
        assert!(SecretKey::from_hex("abcd").is_err());
        assert!(SecretKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_null_key() {
        assert!(SecretKey::null().is_null());
        assert!(!SecretKey::from_hex(SPEND).unwrap().is_null());
    }

    #[test]
    fn test_debug_redacts() {
        let key = SecretKey::from_hex(SPEND).unwrap();
        assert_eq!(format!("{:?}", key), "SecretKey(..)");
    }

    #[test]
    fn test_view_from_spend_is_deterministic_and_reduced() {
        let spend = SecretKey::from_hex(SPEND).unwrap();
        let v1 = generate_view_from_spend(&spend);
        let v2 = generate_view_from_spend(&spend);
        assert_eq!(v1, v2);
        assert_ne!(v1, spend);
        // Reduced mod l (< 2^253), so the top byte never exceeds 0x10.
        assert!(v1.as_bytes()[31] <= 0x10);
    }

    #[test]
    fn test_keys_are_deterministic() {
        let spend = SecretKey::from_hex(SPEND).unwrap();
        let view = generate_view_from_spend(&spend);
        assert!(keys_are_deterministic(&spend, &view));
        assert!(!keys_are_deterministic(&spend, &SecretKey::from_bytes([7u8; 32])));
    }
}

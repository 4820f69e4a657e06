//! Node - read-only view of the daemon's chain heights

use crate::error::WalletResult;

/// Handle to the daemon the wallet syncs against.
pub trait Node {
    /// Height of the last block the local daemon has processed.
    fn last_local_block_height(&self) -> WalletResult<u32>;

    /// Height of the last block the daemon has heard of from the network.
    fn last_known_block_height(&self) -> WalletResult<u32>;

    /// `(local, network)` heights taken from one daemon snapshot.
    fn heights(&self) -> WalletResult<(u32, u32)> {
        Ok((self.last_local_block_height()?, self.last_known_block_height()?))
    }
}

/// Fixed heights. Useful offline and in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticNode {
    pub local: u32,
    pub remote: u32,
}

impl StaticNode {
    pub fn new(local: u32, remote: u32) -> Self { Self { local, remote } }
}

impl Node for StaticNode {
    fn last_local_block_height(&self) -> WalletResult<u32> { Ok(self.local) }
    fn last_known_block_height(&self) -> WalletResult<u32> { Ok(self.remote) }
}

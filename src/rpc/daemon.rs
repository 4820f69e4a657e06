//! DaemonNode - chain heights from the daemon's HTTP API

use super::{endpoint, field_u32};
use crate::error::WalletResult;
use crate::node::Node;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonInfo {
    pub height: u32,
    pub network_height: u32,
}

impl DaemonInfo {
    fn from_value(value: &Value) -> WalletResult<Self> {
        Ok(Self {
            height: field_u32(value, "height")?,
            network_height: field_u32(value, "network_height")?,
        })
    }
}

pub struct DaemonNode {
    client: Client,
    url: String,
}

impl DaemonNode {
    pub fn new(url: impl Into<String>, timeout: Duration) -> WalletResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn info(&self) -> WalletResult<DaemonInfo> {
        let value: Value = self
            .client
            .get(endpoint(&self.url, "getinfo"))
            .send()?
            .error_for_status()?
            .json()?;
        let info = DaemonInfo::from_value(&value)?;
        debug!(height = info.height, network_height = info.network_height, "daemon info");
        Ok(info)
    }
}

impl Node for DaemonNode {
    fn last_local_block_height(&self) -> WalletResult<u32> {
        Ok(self.info()?.height)
    }

    fn last_known_block_height(&self) -> WalletResult<u32> {
        Ok(self.info()?.network_height)
    }

    fn heights(&self) -> WalletResult<(u32, u32)> {
        let info = self.info()?;
        Ok((info.height, info.network_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::test_server::TestServer;
    use serde_json::json;

    #[test]
    fn test_info_from_getinfo_payload() {
        let payload = json!({
            "alt_blocks_count": 0,
            "difficulty": 12345,
            "height": 310_000,
            "network_height": 310_002,
            "status": "OK"
        });
        let info = DaemonInfo::from_value(&payload).unwrap();
        assert_eq!(info, DaemonInfo { height: 310_000, network_height: 310_002 });
    }

    #[test]
    fn test_heights_come_from_one_request() {
        let server = TestServer::start(1, |_: &str| {
            (200, json!({"height": 900, "network_height": 1000, "status": "OK"}).to_string())
        });
        let node = DaemonNode::new(server.url.clone(), Duration::from_secs(5)).unwrap();

        assert_eq!(node.heights().unwrap(), (900, 1000));
        assert_eq!(server.finish().len(), 1);
    }

    #[test]
    fn test_info_rejects_missing_height() {
        assert!(DaemonInfo::from_value(&json!({"status": "OK"})).is_err());
    }
}

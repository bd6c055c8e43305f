//! Lightning node addresses (`<pubkey>@<host:port>`)
//!
//! Scanned QR payloads are accepted with a deliberately loose check: the text
//! only has to contain an `@` and a `:` somewhere. Position and count are not
//! checked, so `a:b@c` passes too. Callers that need a stricter address must
//! validate the parts themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A peer address handed to the open channel screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    /// Everything before the first `@`
    pub pubkey: String,
    /// Everything after the first `@`, verbatim
    pub host: String,
}

impl NodeAddress {
    /// Create an address from its parts
    pub fn new(pubkey: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
            host: host.into(),
        }
    }
}

/// Whether scanned text passes the node address heuristic
pub fn looks_like_node_address(data: &str) -> bool {
    data.contains('@') && data.contains(':')
}

/// Split scanned text into a node address
///
/// Returns `None` when the text lacks either an `@` or a `:`. Only the first
/// `@` is used as the split point.
pub fn parse_scanned(data: &str) -> Option<NodeAddress> {
    if !looks_like_node_address(data) {
        return None;
    }

    let (pubkey, host) = data.split_once('@')?;
    Some(NodeAddress::new(pubkey, host))
}

impl FromStr for NodeAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_scanned(s).ok_or_else(|| Error::InvalidNodeAddress(s.to_string()))
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.pubkey, self.host)
    }
}

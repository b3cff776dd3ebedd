//! The router's own best-known route to each destination, derived from the
//! peer tables by the selector.

use crate::types::{HostId, Latency, Port};
use std::collections::HashMap;

/// The router's chosen next hop and total cost for one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FwdEntry {
    pub dst: HostId,
    pub port: Port,
    pub total_latency: Latency,
}

/// `HostId -> FwdEntry`, one entry per reachable destination. Destinations
/// whose best total is `>= Latency::INFINITY` are absent, never present
/// with an infinite cost.
pub type ForwardingTable = HashMap<HostId, FwdEntry>;

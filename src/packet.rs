//! Packet shapes the core hands to and receives from its environment.
//!
//! The wire format is opaque to the core; what it needs is a way to ask a
//! data packet where it's headed. Route advertisements are a distinct,
//! fully-owned type since the core both emits and never forwards them.

use crate::types::{HostId, Latency};

/// Anything the data plane can look up a destination for.
///
/// Implemented by the environment's packet type. The core never inspects
/// payload or source beyond what forwarding requires.
pub trait Addressed {
    fn destination(&self) -> HostId;
}

/// A route advertisement: "I can reach `destination` at `latency`."
///
/// `latency == Latency::INFINITY` means "I cannot reach this destination"
/// (used by poison reverse and by neighbors reporting their own
/// unreachability) rather than an absent route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePacket {
    pub destination: HostId,
    pub latency: Latency,
}

impl RoutePacket {
    pub fn new(destination: HostId, latency: Latency) -> Self {
        RoutePacket {
            destination,
            latency,
        }
    }
}

//! Per-port record of what a neighbor claims it can reach.

use crate::types::{Expire, HostId, Latency, Time};
use std::collections::HashMap;

/// What a single neighbor has told us about a single destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerEntry {
    pub dst: HostId,
    pub latency: Latency,
    pub expire: Expire,
}

impl PeerEntry {
    pub fn new(dst: HostId, latency: Latency, expire: Expire) -> Self {
        PeerEntry {
            dst,
            latency,
            expire,
        }
    }

    /// A static entry: zero latency past the link, never expires.
    pub fn static_entry(dst: HostId) -> Self {
        PeerEntry {
            dst,
            latency: Latency::ZERO,
            expire: Expire::Forever,
        }
    }
}

/// One neighbor's advertised routes, keyed by destination.
pub type PeerTable = HashMap<HostId, PeerEntry>;

/// Removes every entry in `table` whose `expire_time` has passed as of
/// `now`. Static entries (`Expire::Forever`) are never touched.
///
/// Returns the set of destinations that were removed, so callers can fold
/// the result into "did the forwarding table need recomputing".
pub fn remove_expired(table: &mut PeerTable, now: Time) -> Vec<HostId> {
    let expired: Vec<HostId> = table
        .iter()
        .filter(|(_, entry)| entry.expire.has_expired(now))
        .map(|(dst, _)| *dst)
        .collect();

    for dst in &expired {
        table.remove(dst);
    }

    expired
}

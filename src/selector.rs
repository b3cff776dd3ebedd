//! The route selector: a pure function from link costs and peer tables to
//! a forwarding table.
//!
//! Recomputes from scratch every call rather than maintaining deltas — the
//! input (`sum(|peer_tables[p]|)`) is small enough that correctness beats
//! cleverness here.

use crate::forwarding_table::{ForwardingTable, FwdEntry};
use crate::peer_table::PeerTable;
use crate::types::Port;
use std::collections::HashMap;

/// Rebuilds the forwarding table from the link-latency map and all peer
/// tables.
///
/// Ties (equal saturated total latency via two different ports) are broken
/// by preferring the lowest `Port` number: ports are visited in ascending
/// order and an entry is replaced only on a strictly smaller total, so the
/// first (lowest-numbered) port to reach a given total keeps it. Latency
/// is the only thing callers should assert on, but a free choice among
/// ties still needs to be a *stable* one, so we pin it down here rather
/// than leaving it to hash-map iteration order.
pub fn recompute(
    link_latency: &HashMap<Port, crate::types::Latency>,
    peer_tables: &HashMap<Port, PeerTable>,
) -> ForwardingTable {
    let mut ports: Vec<Port> = link_latency.keys().copied().collect();
    ports.sort();

    let mut table = ForwardingTable::new();

    for port in ports {
        let Some(peers) = peer_tables.get(&port) else {
            continue;
        };
        let link_cost = link_latency[&port];

        for entry in peers.values() {
            let total = link_cost.saturating_add(entry.latency);
            if total.is_infinite() {
                continue;
            }

            let better = match table.get(&entry.dst) {
                None => true,
                Some(current) => total.value() < current.total_latency.value(),
            };

            if better {
                table.insert(
                    entry.dst,
                    FwdEntry {
                        dst: entry.dst,
                        port,
                        total_latency: total,
                    },
                );
            }
        }
    }

    table
}

//! The advertisement engine: split horizon / poison reverse policy and the
//! two operations the router drives it with, `send_routes` and the
//! triggered-update convention used by every table-mutating event.

use crate::capabilities::{PacketSink, SendTarget};
use crate::forwarding_table::ForwardingTable;
use crate::history::History;
use crate::types::{HostId, Latency, Port};
use std::collections::HashSet;

/// The outcome of evaluating `L(p, h)` for one `(port, destination)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outgoing {
    /// Split horizon: say nothing (non-poison mode only).
    Suppressed,
    /// Advertise this latency (possibly `Latency::INFINITY` under poison
    /// reverse, or because the destination is simply unknown).
    Value(Latency),
}

/// Computes `L(p, h)`, the latency this router would advertise to `port`
/// for `dst`.
pub fn outgoing_latency(
    forwarding_table: &ForwardingTable,
    poison_mode: bool,
    port: Port,
    dst: HostId,
) -> Outgoing {
    match forwarding_table.get(&dst) {
        None => {
            if poison_mode {
                Outgoing::Value(Latency::INFINITY)
            } else {
                Outgoing::Suppressed
            }
        }
        Some(entry) if entry.port == port => {
            if poison_mode {
                Outgoing::Value(Latency::INFINITY)
            } else {
                Outgoing::Suppressed
            }
        }
        Some(entry) => Outgoing::Value(entry.total_latency),
    }
}

/// Performs one advertisement sweep: a full pass over every up-port times
/// every known destination, emitting non-suppressed, non-redundant
/// advertisements.
///
/// `force = true` emits every non-suppressed pair regardless of history
/// (used for bootstrapping a new neighbor and for the periodic refresh).
/// `force = false` emits only pairs whose latency changed since the last
/// sweep (a triggered, incremental update).
pub fn send_routes<P>(
    up_ports: &[Port],
    forwarding_table: &ForwardingTable,
    poison_mode: bool,
    history: &mut History,
    force: bool,
    sink: &dyn PacketSink<P>,
    make_packet: impl Fn(HostId, Latency) -> P,
) {
    for &port in up_ports {
        let mut destinations: HashSet<HostId> = forwarding_table.keys().copied().collect();
        destinations.extend(history.known_destinations(port));

        let mut sorted: Vec<HostId> = destinations.into_iter().collect();
        sorted.sort();

        for dst in sorted {
            match outgoing_latency(forwarding_table, poison_mode, port, dst) {
                Outgoing::Suppressed => {
                    history.clear(port, dst);
                }
                Outgoing::Value(latency) => {
                    let should_emit = force || history.is_new(port, dst, latency);
                    if should_emit {
                        sink.send(make_packet(dst, latency), SendTarget::single(port));
                    }
                    history.record(port, dst, latency);
                }
            }
        }
    }
}

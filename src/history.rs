//! Per-port record of the last latency advertised for each destination.
//!
//! Used only by [`crate::advertise`] to decide whether a triggered update
//! carries new information. Never read by callers directly — it's an
//! internal cache the router owns exclusively.

use crate::types::{HostId, Latency, Port};
use std::collections::HashMap;

/// What was last sent for one `(port, destination)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sent {
    /// Nothing has ever been sent for this pair.
    Never,
    /// The last latency sent (may itself be `Latency::INFINITY`, i.e. a
    /// poison-reverse ad).
    Value(Latency),
}

impl Sent {
    fn differs_from(self, latency: Latency) -> bool {
        match self {
            Sent::Never => !latency.is_infinite(),
            Sent::Value(prev) => prev.value() != latency.value(),
        }
    }
}

/// `Port -> HostId -> last latency sent`.
#[derive(Debug, Default)]
pub struct History {
    sent: HashMap<Port, HashMap<HostId, Sent>>,
}

impl History {
    pub fn new() -> Self {
        History {
            sent: HashMap::new(),
        }
    }

    fn entry(&self, port: Port, dst: HostId) -> Sent {
        self.sent
            .get(&port)
            .and_then(|table| table.get(&dst))
            .copied()
            .unwrap_or(Sent::Never)
    }

    /// Whether `latency` is new information for `(port, dst)` — i.e. would
    /// need to be sent under `force = false`.
    pub fn is_new(&self, port: Port, dst: HostId, latency: Latency) -> bool {
        self.entry(port, dst).differs_from(latency)
    }

    /// Records that `latency` was (or, under `force = true`, logically is)
    /// now the latest value sent for `(port, dst)`.
    pub fn record(&mut self, port: Port, dst: HostId, latency: Latency) {
        self.sent
            .entry(port)
            .or_default()
            .insert(dst, Sent::Value(latency));
    }

    /// Clears the record for `(port, dst)`, so a later reappearance is
    /// treated as genuinely new rather than a no-op against a stale value.
    pub fn clear(&mut self, port: Port, dst: HostId) {
        if let Some(table) = self.sent.get_mut(&port) {
            table.remove(&dst);
        }
    }

    /// Destinations this port has a recorded history entry for, regardless
    /// of whether they're still in the forwarding table. Used by
    /// `send_routes` to repeat poison advertisements for destinations that
    /// have disappeared entirely.
    pub fn known_destinations(&self, port: Port) -> Vec<HostId> {
        self.sent
            .get(&port)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Drops the whole per-port record, e.g. when a link goes down.
    pub fn remove_port(&mut self, port: Port) {
        self.sent.remove(&port);
    }
}

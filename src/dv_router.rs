//! The router state machine: owns the tables, receives events, and drives
//! the selector and advertisement engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::advertise;
use crate::capabilities::{Clock, PacketSink, SendTarget, TimerScheduler};
use crate::dv_config::DVRouterConfig;
use crate::dv_error::ConfigError;
use crate::forwarding_table::ForwardingTable;
use crate::history::History;
use crate::packet::{Addressed, RoutePacket};
use crate::peer_table::{self, PeerEntry, PeerTable};
use crate::selector;
use crate::types::{Expire, HostId, Latency, Port, Time};

/// A distance-vector router core.
///
/// Generic over the environment's data-packet type `P` (must be
/// [`Addressed`] and buildable from a [`RoutePacket`], since the router
/// both forwards `P`s and originates route advertisements as `P`s), the
/// injected [`Clock`] `C`, and the injected [`PacketSink`] `S`.
pub struct DVRouter<P, C, S> {
    config: DVRouterConfig,
    link_latency: HashMap<Port, Latency>,
    peer_tables: HashMap<Port, PeerTable>,
    forwarding_table: ForwardingTable,
    history: History,
    clock: C,
    last_now: Option<Time>,
    sink: S,
    _packet: PhantomData<P>,
}

impl<P, C, S> DVRouter<P, C, S>
where
    P: Addressed + From<RoutePacket> + 'static,
    C: Clock + 'static,
    S: PacketSink<P> + 'static,
{
    /// Builds a router and registers its periodic timer callback.
    ///
    /// Returns `Rc<RefCell<_>>` rather than a bare value: the single-
    /// threaded cooperative model means there is no event loop the
    /// router can hand a `&mut self` callback to, so construction
    /// wires `scheduler`'s callback to a weak back-reference instead —
    /// the callback outlives nothing it doesn't already own a strong
    /// reference to, and a dropped router simply stops ticking.
    pub fn new(
        config: DVRouterConfig,
        clock: C,
        sink: S,
        scheduler: &dyn TimerScheduler,
    ) -> Result<Rc<RefCell<Self>>, ConfigError> {
        config.validate()?;

        let router = Rc::new(RefCell::new(DVRouter {
            config,
            link_latency: HashMap::new(),
            peer_tables: HashMap::new(),
            forwarding_table: ForwardingTable::new(),
            history: History::new(),
            clock,
            last_now: None,
            sink,
            _packet: PhantomData,
        }));

        let weak = Rc::downgrade(&router);
        scheduler.start_timer(
            config.timer_interval,
            Box::new(move || {
                if let Some(router) = weak.upgrade() {
                    router.borrow_mut().handle_timer();
                }
            }),
        );

        Ok(router)
    }

    /// Reads the injected clock, asserting it hasn't gone backwards since
    /// the last read. Time going backwards is a precondition violation
    /// (spec: "fail fast"), not a runtime condition the core recovers from.
    fn now(&mut self) -> Time {
        let now = self.clock.now();
        if let Some(last) = self.last_now {
            assert!(now >= last, "clock went backwards: {now} < {last}");
        }
        self.last_now = Some(now);
        now
    }

    /// Brings up a new adjacent link and bootstraps the neighbor with the
    /// router's full current view.
    pub fn handle_link_up(&mut self, port: Port, latency: Latency) {
        assert!(
            !self.link_latency.contains_key(&port),
            "link_up: {port} is already up"
        );
        self.link_latency.insert(port, latency);
        self.peer_tables.insert(port, PeerTable::new());
        debug!(%port, %latency, "link up");
        self.send_routes(true);
    }

    /// Tears down an adjacent link and propagates the resulting route
    /// changes to the remaining neighbors.
    pub fn handle_link_down(&mut self, port: Port) {
        assert!(
            self.link_latency.remove(&port).is_some(),
            "link_down: {port} is not up"
        );
        self.peer_tables.remove(&port);
        self.history.remove_port(port);
        debug!(%port, "link down");
        self.update_forwarding_table();
        self.send_routes(false);
    }

    /// Installs a zero-latency, never-expiring route to `host` reachable
    /// through `port`.
    pub fn add_static_route(&mut self, host: HostId, port: Port) {
        let table = self
            .peer_tables
            .get_mut(&port)
            .unwrap_or_else(|| panic!("add_static_route: {port} is not up"));
        table.insert(host, PeerEntry::static_entry(host));
        debug!(%host, %port, "static route installed");
        self.update_forwarding_table();
        self.send_routes(false);
    }

    /// Learns (or overwrites) a neighbor's claimed route to `dst`. A
    /// `route_latency` of `Latency::INFINITY` is retained, not erased, so
    /// poison-reverse can keep reporting it back.
    pub fn handle_route_advertisement(&mut self, dst: HostId, port: Port, route_latency: Latency) {
        let now = self.now();
        let expire_at = now + self.config.timer_interval * 2;
        let table = self
            .peer_tables
            .get_mut(&port)
            .unwrap_or_else(|| panic!("route advertisement on unknown {port}"));
        table.insert(dst, PeerEntry::new(dst, route_latency, Expire::At(expire_at)));
        debug!(%dst, %port, %route_latency, "route advertisement received");
        self.update_forwarding_table();
        self.send_routes(false);
    }

    /// Forwards a data packet toward its destination, or silently drops it.
    /// Never retried at this layer; DV convergence is the retry mechanism.
    pub fn handle_data_packet(&mut self, packet: P, in_port: Port) {
        let dst = packet.destination();
        let Some(entry) = self.forwarding_table.get(&dst) else {
            debug!(%dst, "no route, dropping data packet");
            return;
        };

        if entry.port == in_port {
            debug!(%dst, %in_port, "hairpin, dropping data packet");
            return;
        }

        if entry.total_latency.is_infinite() {
            warn!(%dst, "forwarding entry at infinity, dropping data packet");
            return;
        }

        let out_port = entry.port;
        self.sink.send(packet, SendTarget::single(out_port));
    }

    /// Periodic tick: ages out stale peer entries, then unconditionally
    /// re-advertises the router's current view. This is
    /// the only path that refreshes a neighbor's `expire_time` on us, and
    /// the only caller of `expire_routes`.
    pub fn handle_timer(&mut self) {
        self.expire_routes();
        self.send_routes(true);
    }

    /// Removes peer entries whose `expire_time` has passed and recomputes
    /// the forwarding table if anything was removed.
    pub fn expire_routes(&mut self) {
        let now = self.now();
        let mut any_expired = false;

        for (port, table) in self.peer_tables.iter_mut() {
            let expired = peer_table::remove_expired(table, now);
            if !expired.is_empty() {
                debug!(%port, ?expired, "peer routes expired");
                any_expired = true;
            }
        }

        if any_expired {
            self.update_forwarding_table();
        }
    }

    /// Rebuilds the forwarding table from scratch. Exposed for tests;
    /// production code never needs to call it directly since every
    /// table-mutating event already does so.
    pub fn update_forwarding_table(&mut self) {
        self.forwarding_table = selector::recompute(&self.link_latency, &self.peer_tables);
    }

    /// Runs one advertisement sweep. Exposed for tests; production code
    /// never needs to call it directly.
    pub fn send_routes(&mut self, force: bool) {
        let mut up_ports: Vec<Port> = self.link_latency.keys().copied().collect();
        up_ports.sort();

        advertise::send_routes(
            &up_ports,
            &self.forwarding_table,
            self.config.poison_mode,
            &mut self.history,
            force,
            &self.sink,
            |dst, latency| P::from(RoutePacket::new(dst, latency)),
        );
    }

    /// Read-only view of the current forwarding table, for assertions.
    pub fn forwarding_table(&self) -> &ForwardingTable {
        &self.forwarding_table
    }

    /// Read-only view of one port's peer table, for assertions.
    pub fn peer_table(&self, port: Port) -> Option<&PeerTable> {
        self.peer_tables.get(&port)
    }

    /// Whether `port` currently has a link up.
    pub fn is_link_up(&self, port: Port) -> bool {
        self.link_latency.contains_key(&port)
    }
}

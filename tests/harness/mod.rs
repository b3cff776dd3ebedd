//! Shared test doubles for the integration suite: a settable, monotonic-
//! asserting clock and a sink that records every `(port, packet)` call
//! instead of delivering it anywhere.

use dv_router::{Clock, PacketSink, RoutePacket, SendTarget, TimerScheduler};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

static INIT_TRACING: Once = Once::new();

/// Installs a `tracing-subscriber` fmt layer the first time any test
/// calls it, so `RUST_LOG=debug cargo test -- --nocapture` shows the
/// router's own `debug!`/`warn!` calls during a run.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestPacket {
    pub destination: dv_router::HostId,
    pub latency: dv_router::Latency,
}

impl dv_router::Addressed for TestPacket {
    fn destination(&self) -> dv_router::HostId {
        self.destination
    }
}

impl From<RoutePacket> for TestPacket {
    fn from(ad: RoutePacket) -> Self {
        TestPacket {
            destination: ad.destination,
            latency: ad.latency,
        }
    }
}

/// A clock the test drives by hand. Panics if asked to go backwards, the
/// same precondition the router itself enforces on its injected clock.
pub struct FakeClock {
    now: RefCell<dv_router::Time>,
}

impl FakeClock {
    pub fn new(start: u64) -> Self {
        FakeClock {
            now: RefCell::new(dv_router::Time::new(start)),
        }
    }

    pub fn set(&self, t: u64) {
        let next = dv_router::Time::new(t);
        let mut now = self.now.borrow_mut();
        assert!(next >= *now, "test clock must not go backwards");
        *now = next;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> dv_router::Time {
        *self.now.borrow()
    }
}

/// So a test can keep an `Rc<FakeClock>` to advance the clock while the
/// router owns a clone of the same underlying cell.
impl Clock for Rc<FakeClock> {
    fn now(&self) -> dv_router::Time {
        FakeClock::now(self)
    }
}

/// Records every packet handed to `send`, tagged with its target, instead
/// of delivering it. Tests drain `sent()` to assert on emitted
/// advertisements or forwarded data packets.
#[derive(Default)]
pub struct RecordingSink {
    sent: RefCell<Vec<(TestPacket, SendTarget)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Drains and returns everything sent so far.
    pub fn drain(&self) -> Vec<(TestPacket, SendTarget)> {
        self.sent.borrow_mut().drain(..).collect()
    }

    /// All `(destination, latency)` pairs sent to exactly `port` so far
    /// (via `SendTarget::Port`), without draining.
    pub fn route_ads_to(&self, port: dv_router::Port) -> Vec<(dv_router::HostId, dv_router::Latency)> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|(packet, target)| match target {
                SendTarget::Port(p) if *p == port => Some((packet.destination, packet.latency)),
                _ => None,
            })
            .collect()
    }
}

impl PacketSink<TestPacket> for RecordingSink {
    fn send(&self, packet: TestPacket, target: SendTarget) {
        self.sent.borrow_mut().push((packet, target));
    }
}

/// So a test can keep an `Rc<RecordingSink>` for assertions while handing
/// the router a clone to own.
impl PacketSink<TestPacket> for Rc<RecordingSink> {
    fn send(&self, packet: TestPacket, target: SendTarget) {
        RecordingSink::send(self, packet, target);
    }
}

/// A scheduler that stashes its callback instead of driving it, so tests
/// can invoke `fire()` to simulate a timer tick on their own schedule.
#[derive(Default)]
pub struct ManualScheduler {
    callback: RefCell<Option<Box<dyn FnMut()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    pub fn fire(&self) {
        if let Some(callback) = self.callback.borrow_mut().as_mut() {
            callback();
        }
    }
}

impl TimerScheduler for ManualScheduler {
    fn start_timer(&self, _interval: Duration, callback: Box<dyn FnMut()>) {
        *self.callback.borrow_mut() = Some(callback);
    }
}

/// Ports not explicitly excluded get everything (a `FloodExcept` with an
/// empty exclusion set), matching the "flood = all up-ports" rule in the
/// spec's injected-sink contract.
pub fn all_except(ports: impl IntoIterator<Item = dv_router::Port>) -> SendTarget {
    SendTarget::FloodExcept(ports.into_iter().collect::<HashSet<_>>())
}

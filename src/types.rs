//! Value types shared by the whole routing core: opaque host identities,
//! port numbers, the saturating latency metric, and the monotonic time
//! the environment injects.

use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// Opaque handle identifying a destination host.
///
/// Deliberately a small integer newtype rather than a reference into the
/// environment's host graph — equality, hashing and ordering are all that
/// the routing core ever needs from a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostId(pub u64);

impl HostId {
    pub const fn new(id: u64) -> Self {
        HostId(id)
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host({})", self.0)
    }
}

/// Local interface number. Only ports that have seen `link_up` (and not a
/// subsequent `link_down`) are addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(pub u32);

impl Port {
    pub const fn new(id: u32) -> Self {
        Port(id)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {}", self.0)
    }
}

/// Abstract monotonic simulation time, in ticks of the environment's
/// choosing. Never read from the wall clock directly; time is an injected
/// capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub u64);

impl Time {
    pub const fn new(t: u64) -> Self {
        Time(t)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Time {
        Time(self.0 + rhs.as_secs())
    }
}

/// The latency cap. Any saturating total at or above this value is
/// unreachable and arithmetic stops counting further.
const INFINITY_VALUE: f64 = 16.0;

/// A non-negative latency, saturating at [`Latency::INFINITY`].
///
/// Wrapping `f64` in a newtype (rather than passing bare floats around)
/// keeps the saturation and non-negativity rules enforced at construction
/// time instead of scattered through the selector and advertisement logic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latency(f64);

impl Latency {
    /// The sentinel latency at which a destination is unreachable.
    pub const INFINITY: Latency = Latency(INFINITY_VALUE);

    /// A latency of zero (used for static routes' "free" last hop).
    pub const ZERO: Latency = Latency(0.0);

    /// Builds a finite latency, saturating at `INFINITY` if `value` meets
    /// or exceeds it.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative or not finite — negative latencies
    /// have no meaning in this model and indicate a caller bug.
    pub fn finite(value: f64) -> Self {
        assert!(
            value.is_finite() && value >= 0.0,
            "latency must be a non-negative finite number, got {value}"
        );
        Latency(value.min(INFINITY_VALUE))
    }

    /// Raw numeric value, capped at [`Latency::INFINITY`].
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this latency is at or beyond the cap (i.e. unreachable).
    pub fn is_infinite(self) -> bool {
        self.0 >= INFINITY_VALUE
    }

    /// Adds two latencies, saturating at `INFINITY` rather than overflowing
    /// or counting past it. This is the only arithmetic the selector needs.
    pub fn saturating_add(self, other: Latency) -> Latency {
        Latency((self.0 + other.0).min(INFINITY_VALUE))
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "INF")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// When a peer-table entry expires, if ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expire {
    /// Never expires (static routes).
    Forever,
    /// Expires once `current_time() > at` (strictly past, not at, the
    /// stamped time).
    At(Time),
}

impl Expire {
    /// Whether this entry has expired as of `now`. Strict: an entry whose
    /// `expire_time` equals `now` has not expired yet, it expires on the
    /// next tick past it.
    pub fn has_expired(self, now: Time) -> bool {
        match self {
            Expire::Forever => false,
            Expire::At(at) => now > at,
        }
    }
}

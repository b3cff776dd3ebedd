pub mod advertise;
pub mod capabilities;
pub mod dv_config;
pub mod dv_error;
pub mod dv_router;
pub mod forwarding_table;
pub mod history;
pub mod packet;
pub mod peer_table;
pub mod selector;
pub mod types;

pub use capabilities::{Clock, PacketSink, SendTarget, TimerScheduler};
pub use dv_config::DVRouterConfig;
pub use dv_error::ConfigError;
pub use dv_router::DVRouter;
pub use forwarding_table::{ForwardingTable, FwdEntry};
pub use packet::{Addressed, RoutePacket};
pub use peer_table::{PeerEntry, PeerTable};
pub use types::{Expire, HostId, Latency, Port, Time};

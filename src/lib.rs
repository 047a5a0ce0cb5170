//! Passive player location tracking for frame-relaying proxies
//!
//! A relay sitting between game clients and servers forwards an opaque
//! binary frame stream in both directions. This crate taps that stream —
//! without owning or altering it — and keeps one live location record per
//! connection: position, orientation, dimension, and (via a cooperating
//! endpoint-side agent) the actual world identity the base protocol cannot
//! express.
//!
//! # Architecture
//!
//! ```text
//!  client ── inbound frames ──► [relay connection] ── forwarded ──► server
//!                                      │
//!                               LocationInterceptor     (one per connection)
//!                                      │
//!                              Arc<LocationRegistry>    (shared, concurrent)
//!                                      │
//!                               LocationHandle ── snapshot() ──► Location
//! ```
//!
//! The tap is purely observational: every frame is forwarded unchanged by
//! the host whether or not it decoded, and a malformed frame only means one
//! skipped tracking update.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use locapi::{SessionKey, Tracker};
//! # use locapi::intercept::{FrameChain, FrameTap};
//! # struct MyChain;
//! # impl FrameChain for MyChain {
//! #     fn install(&self, _tap: Arc<dyn FrameTap>) -> Result<(), locapi::error::InstallError> { Ok(()) }
//! #     fn uninstall(&self) {}
//! # }
//!
//! # async fn run() {
//! let tracker = Tracker::new();
//!
//! // Session start: insert the tap into the connection's frame chain.
//! let key = SessionKey(1);
//! let _tap = tracker.attach(key, Arc::new(MyChain)).await;
//!
//! // Any time later, from any task:
//! if let Some(handle) = tracker.lookup(key) {
//!     let loc = handle.snapshot();
//!     println!("player at {} in {:?}", loc, loc.world_name());
//! }
//!
//! // Disconnect: tear down the tap and the record.
//! tracker.detach(key).await;
//! # }
//! ```

pub mod bridge;
pub mod error;
pub mod intercept;
pub mod location;
pub mod protocol;
pub mod registry;

pub use bridge::{WorldIdentity, WorldIdentityAgent};
pub use intercept::{LocationInterceptor, Tracker, TrackerConfig};
pub use location::{Dimension, Location, LocationHandle};
pub use registry::{LocationRegistry, SessionKey};

//! Frame interception
//!
//! The relay inserts a [`LocationInterceptor`] into each connection's frame
//! chain at session start. Every frame passes through it exactly once per
//! direction, is observed, and is then forwarded unchanged by the host —
//! the tap never consumes, alters, or reorders traffic.
//!
//! The host side of the seam is two small traits: [`FrameTap`] is what the
//! chain calls per frame, [`FrameChain`] is how the [`Tracker`] installs and
//! removes taps. A host that cannot provide an insertion point makes
//! [`Tracker::attach`] degrade to doing no interception at all; the stream
//! keeps flowing either way.

use std::sync::Arc;

use crate::error::InstallError;
use crate::protocol::{Direction, Frame};

mod tap;
mod tracker;

pub use tap::LocationInterceptor;
pub use tracker::{Tracker, TrackerConfig};

/// Observer of one connection's frame traffic
///
/// Called once per frame before terminal forwarding, for both directions.
/// Implementations must be cheap and non-blocking; the frame is forwarded by
/// the caller regardless of what `observe` does.
pub trait FrameTap: Send + Sync {
    /// Observe one frame; the caller forwards it afterwards
    fn observe(&self, direction: Direction, frame: &Frame);
}

/// Host-provided insertion point into a connection's frame chain
///
/// The chain must position the tap so it sees every frame exactly once
/// before default forwarding.
pub trait FrameChain: Send + Sync {
    /// Insert a tap into the chain
    fn install(&self, tap: Arc<dyn FrameTap>) -> Result<(), InstallError>;

    /// Remove a previously installed tap
    ///
    /// Removing a tap that is not installed is a no-op.
    fn uninstall(&self);
}

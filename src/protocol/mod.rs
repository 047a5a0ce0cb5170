//! Wire protocol support
//!
//! Frame codecs, the tagged-message side channel, and the explicit frame
//! classification table. Everything here is stateless; connection state
//! lives in [`crate::registry`] and [`crate::intercept`].

pub mod constants;
pub mod frames;
pub mod table;
pub mod tagged;

pub use frames::{DimensionChange, Frame, Look, Position, PositionAndLook};
pub use table::{Direction, FrameKind, ProtocolTable};
pub use tagged::TaggedMessage;

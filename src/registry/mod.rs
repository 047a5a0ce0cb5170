//! Location registry
//!
//! Maps connection identity to the live location record mutated by that
//! connection's tap. The registry is the only state shared across
//! connections; everything else in the crate partitions per connection.
//!
//! Records are live-by-reference: a [`LocationHandle`](crate::location::LocationHandle)
//! obtained here keeps reflecting updates until the session's entry is
//! removed at disconnect. Use `snapshot()` for a value that stops moving.

pub mod store;

pub use store::{LocationRegistry, SessionKey};

//! World identity bridge
//!
//! Side channel between the authoritative endpoint and the relay, carrying
//! the world identity the base wire protocol cannot express. The relay side
//! lives in [`crate::intercept`]; this module holds the payload codec and
//! the endpoint-side producer.

pub mod agent;
pub mod message;

pub use agent::{TaggedSender, WorldIdentityAgent};
pub use message::WorldIdentity;

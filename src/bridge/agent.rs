//! Endpoint-side world identity agent
//!
//! Runs inside the authoritative world host, which is the only party that
//! actually knows which world an entity is in. The agent announces the
//! identity when an entity first becomes observable and again on every world
//! change; both triggers emit the identical payload.
//!
//! Delivery is fire-and-forget and at-most-once: no acknowledgement, no
//! retry, no cross-message correlation. A relay that never hears from an
//! agent simply keeps world identity unset, which is a valid steady state.

use bytes::Bytes;

use crate::protocol::constants::WORLD_MESSAGE_TAG;

use super::message::WorldIdentity;

/// Transport primitive for sending tagged messages
///
/// Implemented by the host around whatever carries its application
/// payloads; the channel is shared with unrelated tags.
#[allow(async_fn_in_trait)]
pub trait TaggedSender {
    /// Send one tagged payload toward the relay
    async fn send_tagged(&self, tag: &str, payload: Bytes) -> std::io::Result<()>;
}

/// Producer of world identity announcements
pub struct WorldIdentityAgent<S> {
    sender: S,
    tag: String,
}

impl<S: TaggedSender> WorldIdentityAgent<S> {
    /// Create an agent announcing under the default world tag
    pub fn new(sender: S) -> Self {
        Self::with_tag(sender, WORLD_MESSAGE_TAG)
    }

    /// Create an agent announcing under a custom tag
    ///
    /// The relay must be configured with the same tag.
    pub fn with_tag(sender: S, tag: impl Into<String>) -> Self {
        Self {
            sender,
            tag: tag.into(),
        }
    }

    /// An entity became observable to this endpoint
    pub async fn on_join(&self, world: &WorldIdentity) {
        self.announce(world).await;
    }

    /// A tracked entity moved to a different world
    pub async fn on_world_change(&self, world: &WorldIdentity) {
        self.announce(world).await;
    }

    async fn announce(&self, world: &WorldIdentity) {
        if let Err(e) = self.sender.send_tagged(&self.tag, world.encode()).await {
            // At-most-once: a lost announcement stays lost.
            tracing::debug!(world = %world, error = %e, "World identity announcement dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, Bytes)>>,
    }

    impl TaggedSender for &RecordingSender {
        async fn send_tagged(&self, tag: &str, payload: Bytes) -> io::Result<()> {
            self.sent.lock().unwrap().push((tag.to_owned(), payload));
            Ok(())
        }
    }

    struct FailingSender;

    impl TaggedSender for FailingSender {
        async fn send_tagged(&self, _tag: &str, _payload: Bytes) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    fn world() -> WorldIdentity {
        WorldIdentity::new(Uuid::from_u64_pair(7, 9), "spawn")
    }

    #[tokio::test]
    async fn test_both_triggers_emit_identical_payloads() {
        let sender = RecordingSender::default();
        let agent = WorldIdentityAgent::new(&sender);

        agent.on_join(&world()).await;
        agent.on_world_change(&world()).await;

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, WORLD_MESSAGE_TAG);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(sent[0].1, world().encode());
    }

    #[tokio::test]
    async fn test_custom_tag() {
        let sender = RecordingSender::default();
        let agent = WorldIdentityAgent::with_tag(&sender, "CUSTOM");

        agent.on_join(&world()).await;

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent[0].0, "CUSTOM");
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let agent = WorldIdentityAgent::new(FailingSender);
        // Must not panic or surface the error.
        agent.on_join(&world()).await;
        agent.on_world_change(&world()).await;
    }
}

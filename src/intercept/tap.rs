//! Per-connection duplex tap
//!
//! One [`LocationInterceptor`] per relayed connection. Inbound frames may
//! create the session's registry entry; outbound frames only refine an entry
//! that inbound traffic (or a bridge message) has already created — an
//! outbound refinement never fabricates tracking state.
//!
//! Decoding happens on the frame path, so failures are strictly local: a
//! malformed body is logged at debug, the update is skipped, and the frame
//! is forwarded by the host like any other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bridge::WorldIdentity;
use crate::protocol::frames::{DimensionChange, Look, Position, PositionAndLook};
use crate::protocol::{Direction, Frame, FrameKind, ProtocolTable, TaggedMessage};
use crate::registry::{LocationRegistry, SessionKey};

use super::FrameTap;

/// Duplex frame tap updating one session's location record
///
/// Two states: attached (observing) and detached (inert). Detaching is
/// idempotent and safe while frames for the same connection are mid-flight;
/// a detached tap observes nothing.
pub struct LocationInterceptor {
    key: SessionKey,
    registry: Arc<LocationRegistry>,
    table: Arc<ProtocolTable>,
    world_tag: String,
    attached: AtomicBool,
}

impl LocationInterceptor {
    pub(crate) fn new(
        key: SessionKey,
        registry: Arc<LocationRegistry>,
        table: Arc<ProtocolTable>,
        world_tag: String,
    ) -> Self {
        Self {
            key,
            registry,
            table,
            world_tag,
            attached: AtomicBool::new(true),
        }
    }

    /// The session this tap belongs to
    pub fn key(&self) -> SessionKey {
        self.key
    }

    /// Whether the tap is still observing
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Relaxed)
    }

    /// Stop observing; idempotent
    pub(crate) fn detach(&self) {
        self.attached.store(false, Ordering::Relaxed);
    }

    fn observe_inbound(&self, frame: &Frame) {
        match self.table.classify(Direction::Inbound, frame.id) {
            Some(FrameKind::Position) => match Position::decode(&mut frame.body.clone()) {
                Ok(pos) => {
                    self.registry
                        .get_or_create(self.key)
                        .update_position(pos.x, pos.y, pos.z, pos.on_ground);
                }
                Err(e) => self.skip(frame, &e),
            },
            Some(FrameKind::Look) => match Look::decode(&mut frame.body.clone()) {
                Ok(look) => {
                    self.registry
                        .get_or_create(self.key)
                        .update_look(look.yaw, look.pitch);
                }
                Err(e) => self.skip(frame, &e),
            },
            Some(FrameKind::Tagged) => self.observe_tagged(frame),
            _ => {}
        }
    }

    fn observe_outbound(&self, frame: &Frame) {
        match self.table.classify(Direction::Outbound, frame.id) {
            Some(FrameKind::PositionAndLook) => {
                match PositionAndLook::decode(&mut frame.body.clone()) {
                    Ok(pos) => {
                        // Refine only: a session never seen inbound stays
                        // untracked. The frame carries no ground flag.
                        if let Some(handle) = self.registry.lookup(self.key) {
                            handle.update_position(pos.x, pos.y, pos.z, false);
                            handle.update_look(pos.yaw, pos.pitch);
                        }
                    }
                    Err(e) => self.skip(frame, &e),
                }
            }
            Some(FrameKind::Login) | Some(FrameKind::Respawn) => {
                match DimensionChange::decode(&mut frame.body.clone()) {
                    Ok(change) => {
                        if let Some(handle) = self.registry.lookup(self.key) {
                            handle.update_dimension(change.dimension());
                        }
                    }
                    Err(e) => self.skip(frame, &e),
                }
            }
            _ => {}
        }
    }

    /// A tagged frame may carry the world identity or any unrelated payload
    fn observe_tagged(&self, frame: &Frame) {
        let msg = match TaggedMessage::decode(&mut frame.body.clone()) {
            Ok(msg) => msg,
            Err(e) => return self.skip(frame, &e),
        };
        match WorldIdentity::from_tagged(&msg, &self.world_tag) {
            Ok(Some(world)) => {
                // The bridge message may arrive before any position frame.
                self.registry
                    .get_or_create(self.key)
                    .update_world(world.uuid, world.name);
            }
            Ok(None) => {} // foreign tag, not ours
            Err(e) => self.skip(frame, &e),
        }
    }

    fn skip(&self, frame: &Frame, error: &crate::error::FrameError) {
        tracing::debug!(
            session = %self.key,
            frame_id = frame.id,
            error = %error,
            "Undecodable frame, tracking update skipped"
        );
    }
}

impl FrameTap for LocationInterceptor {
    fn observe(&self, direction: Direction, frame: &Frame) {
        if !self.is_attached() {
            return;
        }
        match direction {
            Direction::Inbound => self.observe_inbound(frame),
            Direction::Outbound => self.observe_outbound(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use uuid::Uuid;

    use crate::protocol::constants::*;

    use super::*;

    fn tap() -> (LocationInterceptor, Arc<LocationRegistry>) {
        let registry = Arc::new(LocationRegistry::new());
        let interceptor = LocationInterceptor::new(
            SessionKey(1),
            Arc::clone(&registry),
            Arc::new(ProtocolTable::vanilla()),
            WORLD_MESSAGE_TAG.to_owned(),
        );
        (interceptor, registry)
    }

    fn position_frame(x: f64, y: f64, z: f64, on_ground: bool) -> Frame {
        Frame::new(
            SERVERBOUND_POSITION,
            Position { x, y, z, on_ground }.encode(),
        )
    }

    #[test]
    fn test_inbound_position_creates_entry() {
        let (tap, registry) = tap();

        tap.observe(Direction::Inbound, &position_frame(10.0, 64.0, -5.0, true));

        let snap = registry.lookup(SessionKey(1)).unwrap().snapshot();
        assert_eq!(snap.x(), 10.0);
        assert_eq!(snap.y(), 64.0);
        assert_eq!(snap.z(), -5.0);
        assert!(snap.on_ground());
        // Look group untouched by a position frame.
        assert_eq!(snap.yaw(), -1.0);
        assert_eq!(snap.pitch(), -1.0);
    }

    #[test]
    fn test_inbound_look_updates_only_look() {
        let (tap, registry) = tap();

        let frame = Frame::new(
            SERVERBOUND_LOOK,
            Look {
                yaw: 90.0,
                pitch: -30.0,
                on_ground: true,
            }
            .encode(),
        );
        tap.observe(Direction::Inbound, &frame);

        let snap = registry.lookup(SessionKey(1)).unwrap().snapshot();
        assert_eq!(snap.yaw(), 90.0);
        assert_eq!(snap.pitch(), -30.0);
        assert!(snap.x().is_nan());
    }

    #[test]
    fn test_outbound_refinement_never_creates_entry() {
        let (tap, registry) = tap();

        let frame = Frame::new(
            CLIENTBOUND_POSITION_AND_LOOK,
            PositionAndLook {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                yaw: 90.0,
                pitch: 0.0,
                flags: 0x1F,
            }
            .encode(),
        );
        tap.observe(Direction::Outbound, &frame);

        assert!(registry.lookup(SessionKey(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_outbound_refinement_updates_existing_entry() {
        let (tap, registry) = tap();

        tap.observe(Direction::Inbound, &position_frame(0.0, 0.0, 0.0, true));
        let frame = Frame::new(
            CLIENTBOUND_POSITION_AND_LOOK,
            PositionAndLook {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                yaw: 45.0,
                pitch: 10.0,
                flags: 0,
            }
            .encode(),
        );
        tap.observe(Direction::Outbound, &frame);

        let snap = registry.lookup(SessionKey(1)).unwrap().snapshot();
        assert_eq!(snap.x(), 1.0);
        assert_eq!(snap.yaw(), 45.0);
        // No ground flag on this frame kind; forced false.
        assert!(!snap.on_ground());
    }

    #[test]
    fn test_bridge_message_before_any_position() {
        let (tap, registry) = tap();

        let uuid = Uuid::from_u64_pair(0x0102030405060708, 0x0304050607080910);
        let world = WorldIdentity::new(uuid, "world");
        let frame = Frame::new(SERVERBOUND_TAGGED, world.to_tagged().encode());
        tap.observe(Direction::Inbound, &frame);

        let snap = registry.lookup(SessionKey(1)).unwrap().snapshot();
        assert_eq!(snap.world_uuid(), Some(uuid));
        assert_eq!(snap.world_name(), Some("world"));
        assert!(snap.x().is_nan());
    }

    #[test]
    fn test_foreign_tag_is_ignored() {
        let (tap, registry) = tap();

        let msg = TaggedMessage::new("MOD|Chat", Bytes::from_static(b"hello"));
        tap.observe(
            Direction::Inbound,
            &Frame::new(SERVERBOUND_TAGGED, msg.encode()),
        );

        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_dimension_becomes_none() {
        let (tap, registry) = tap();

        tap.observe(Direction::Inbound, &position_frame(1.0, 2.0, 3.0, false));
        tap.observe(
            Direction::Outbound,
            &Frame::new(CLIENTBOUND_LOGIN, DimensionChange { dimension_id: 0 }.encode()),
        );
        assert_eq!(
            registry.lookup(SessionKey(1)).unwrap().snapshot().dimension(),
            Some(crate::location::Dimension::Overworld)
        );

        tap.observe(
            Direction::Outbound,
            &Frame::new(
                CLIENTBOUND_RESPAWN,
                DimensionChange { dimension_id: 99 }.encode(),
            ),
        );
        let snap = registry.lookup(SessionKey(1)).unwrap().snapshot();
        assert_eq!(snap.dimension(), None);
        // Other groups untouched.
        assert_eq!(snap.x(), 1.0);
    }

    #[test]
    fn test_outbound_dimension_without_entry_is_skipped() {
        let (tap, registry) = tap();

        tap.observe(
            Direction::Outbound,
            &Frame::new(CLIENTBOUND_LOGIN, DimensionChange { dimension_id: 0 }.encode()),
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_truncated_frame_skips_update() {
        let (tap, registry) = tap();

        tap.observe(
            Direction::Inbound,
            &Frame::new(SERVERBOUND_POSITION, Bytes::from_static(&[0u8; 5])),
        );
        assert!(registry.is_empty());

        // An existing entry is left untouched by later garbage.
        tap.observe(Direction::Inbound, &position_frame(1.0, 2.0, 3.0, false));
        tap.observe(
            Direction::Inbound,
            &Frame::new(SERVERBOUND_POSITION, Bytes::from_static(&[0u8; 3])),
        );
        assert_eq!(registry.lookup(SessionKey(1)).unwrap().snapshot().x(), 1.0);
    }

    #[test]
    fn test_unclassified_frames_are_noops() {
        let (tap, registry) = tap();

        tap.observe(Direction::Inbound, &Frame::new(0x42, Bytes::from_static(&[1, 2, 3])));
        tap.observe(Direction::Outbound, &Frame::new(0x42, Bytes::new()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_table_observes_nothing() {
        let registry = Arc::new(LocationRegistry::new());
        let tap = LocationInterceptor::new(
            SessionKey(1),
            Arc::clone(&registry),
            Arc::new(ProtocolTable::empty()),
            WORLD_MESSAGE_TAG.to_owned(),
        );

        tap.observe(Direction::Inbound, &position_frame(1.0, 2.0, 3.0, true));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_detached_tap_is_inert() {
        let (tap, registry) = tap();

        tap.detach();
        assert!(!tap.is_attached());
        tap.observe(Direction::Inbound, &position_frame(1.0, 2.0, 3.0, true));
        assert!(registry.is_empty());

        // Idempotent.
        tap.detach();
        assert!(!tap.is_attached());
    }
}

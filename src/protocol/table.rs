//! Frame classification table
//!
//! Frame ids are not stable across protocol revisions and id spaces differ
//! per direction, so the relay owns an explicit table mapping
//! `(direction, id)` to a recognized frame kind. Ids the table does not know
//! are simply not tracked. An empty table turns the whole subsystem into a
//! pass-through.

use std::collections::HashMap;

use super::constants::*;

/// Direction of a frame relative to the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Client→server, read side
    Inbound,
    /// Server→client, write side
    Outbound,
}

/// Recognized frame kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Position,
    Look,
    PositionAndLook,
    Login,
    Respawn,
    Tagged,
}

/// Map from `(direction, frame id)` to frame kind
#[derive(Debug, Clone)]
pub struct ProtocolTable {
    inbound: HashMap<i32, FrameKind>,
    outbound: HashMap<i32, FrameKind>,
}

impl ProtocolTable {
    /// Create a table that classifies nothing
    ///
    /// Useful when the host protocol revision is unknown: every frame
    /// becomes a no-op and the subsystem degrades to pure forwarding.
    pub fn empty() -> Self {
        Self {
            inbound: HashMap::new(),
            outbound: HashMap::new(),
        }
    }

    /// Create a table with the classic frame ids
    pub fn vanilla() -> Self {
        let mut table = Self::empty();
        table.register(Direction::Inbound, SERVERBOUND_POSITION, FrameKind::Position);
        table.register(Direction::Inbound, SERVERBOUND_LOOK, FrameKind::Look);
        table.register(Direction::Inbound, SERVERBOUND_TAGGED, FrameKind::Tagged);
        table.register(
            Direction::Outbound,
            CLIENTBOUND_POSITION_AND_LOOK,
            FrameKind::PositionAndLook,
        );
        table.register(Direction::Outbound, CLIENTBOUND_LOGIN, FrameKind::Login);
        table.register(Direction::Outbound, CLIENTBOUND_RESPAWN, FrameKind::Respawn);
        table.register(Direction::Outbound, CLIENTBOUND_TAGGED, FrameKind::Tagged);
        table
    }

    /// Register a frame kind under an id, replacing any previous mapping
    pub fn register(&mut self, direction: Direction, id: i32, kind: FrameKind) {
        self.side_mut(direction).insert(id, kind);
    }

    /// Classify a frame id, `None` for ids this table does not know
    pub fn classify(&self, direction: Direction, id: i32) -> Option<FrameKind> {
        self.side(direction).get(&id).copied()
    }

    fn side(&self, direction: Direction) -> &HashMap<i32, FrameKind> {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
        }
    }

    fn side_mut(&mut self, direction: Direction) -> &mut HashMap<i32, FrameKind> {
        match direction {
            Direction::Inbound => &mut self.inbound,
            Direction::Outbound => &mut self.outbound,
        }
    }
}

impl Default for ProtocolTable {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanilla_classification() {
        let table = ProtocolTable::vanilla();
        assert_eq!(
            table.classify(Direction::Inbound, SERVERBOUND_POSITION),
            Some(FrameKind::Position)
        );
        assert_eq!(
            table.classify(Direction::Outbound, CLIENTBOUND_POSITION_AND_LOOK),
            Some(FrameKind::PositionAndLook)
        );
        // Id spaces are per-direction.
        assert_eq!(table.classify(Direction::Outbound, SERVERBOUND_POSITION), None);
    }

    #[test]
    fn test_unknown_ids_are_unclassified() {
        let table = ProtocolTable::vanilla();
        assert_eq!(table.classify(Direction::Inbound, 0x7F), None);
    }

    #[test]
    fn test_register_replaces() {
        let mut table = ProtocolTable::vanilla();
        table.register(Direction::Inbound, 0x12, FrameKind::Position);
        table.register(Direction::Inbound, SERVERBOUND_POSITION, FrameKind::Look);
        assert_eq!(
            table.classify(Direction::Inbound, 0x12),
            Some(FrameKind::Position)
        );
        assert_eq!(
            table.classify(Direction::Inbound, SERVERBOUND_POSITION),
            Some(FrameKind::Look)
        );
    }

    #[test]
    fn test_empty_classifies_nothing() {
        let table = ProtocolTable::empty();
        assert_eq!(table.classify(Direction::Inbound, SERVERBOUND_POSITION), None);
        assert_eq!(
            table.classify(Direction::Outbound, CLIENTBOUND_LOGIN),
            None
        );
    }
}

//! Protocol constants

/// Tag of the world-identity side-channel message
///
/// The tagged channel is shared with unrelated application payloads; only
/// frames carrying exactly this tag belong to the bridge.
pub const WORLD_MESSAGE_TAG: &str = "LAPIW";

/// Sentinel for a yaw/pitch that has never been observed
pub const LOOK_UNSET: f32 = -1.0;

/// Fixed size of the UUID prefix in a world-identity payload
pub const WORLD_UUID_LEN: usize = 16;

// Classic frame ids, overridable through `ProtocolTable::register`.

/// Client→server position frame
pub const SERVERBOUND_POSITION: i32 = 0x04;
/// Client→server look frame
pub const SERVERBOUND_LOOK: i32 = 0x05;
/// Client→server tagged message frame
pub const SERVERBOUND_TAGGED: i32 = 0x17;
/// Server→client combined position and look frame
pub const CLIENTBOUND_POSITION_AND_LOOK: i32 = 0x08;
/// Server→client login frame
pub const CLIENTBOUND_LOGIN: i32 = 0x01;
/// Server→client respawn frame
pub const CLIENTBOUND_RESPAWN: i32 = 0x07;
/// Server→client tagged message frame
pub const CLIENTBOUND_TAGGED: i32 = 0x3F;

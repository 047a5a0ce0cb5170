//! Frame codecs
//!
//! Stateless decode/encode pairs for the frame kinds this subsystem
//! understands. All multi-byte values are big-endian. Decoding fails only on
//! truncated layouts; well-formed-but-unexpected values pass through (an
//! unknown dimension id is not a decode error).
//!
//! Wire layouts:
//! ```text
//! Position          f64 x | f64 y | f64 z | u8 on_ground
//! Look              f32 yaw | f32 pitch | u8 on_ground
//! PositionAndLook   f64 x | f64 y | f64 z | f32 yaw | f32 pitch | u8 flags
//! Login / Respawn   i32 dimension id | ...ignored remainder
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::FrameError;
use crate::location::Dimension;

/// One raw frame as seen by the relay
///
/// The body is the frame payload after the id has been split off by the
/// host's framing layer. `Bytes` keeps observation zero-copy: the tap and
/// the forwarding path share one allocation.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame id within its direction's id space
    pub id: i32,
    /// Frame payload
    pub body: Bytes,
}

impl Frame {
    /// Create a frame from an id and payload
    pub fn new(id: i32, body: impl Into<Bytes>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// Client→server position report
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub on_ground: bool,
}

impl Position {
    const WIRE_LEN: usize = 8 + 8 + 8 + 1;

    /// Decode from a frame body
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < Self::WIRE_LEN {
            return Err(FrameError::UnexpectedEof);
        }
        Ok(Self {
            x: buf.get_f64(),
            y: buf.get_f64(),
            z: buf.get_f64(),
            on_ground: buf.get_u8() != 0,
        })
    }

    /// Encode to a frame body
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WIRE_LEN);
        buf.put_f64(self.x);
        buf.put_f64(self.y);
        buf.put_f64(self.z);
        buf.put_u8(self.on_ground as u8);
        buf.freeze()
    }
}

/// Client→server look report
#[derive(Debug, Clone, PartialEq)]
pub struct Look {
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Look {
    const WIRE_LEN: usize = 4 + 4 + 1;

    /// Decode from a frame body
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < Self::WIRE_LEN {
            return Err(FrameError::UnexpectedEof);
        }
        Ok(Self {
            yaw: buf.get_f32(),
            pitch: buf.get_f32(),
            on_ground: buf.get_u8() != 0,
        })
    }

    /// Encode to a frame body
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WIRE_LEN);
        buf.put_f32(self.yaw);
        buf.put_f32(self.pitch);
        buf.put_u8(self.on_ground as u8);
        buf.freeze()
    }
}

/// Server→client combined position and look refinement
///
/// The trailing bitmask marks coordinates as relative to the current
/// position. It is decoded and carried but not interpreted; coordinates are
/// applied as absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAndLook {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub flags: u8,
}

impl PositionAndLook {
    const WIRE_LEN: usize = 8 + 8 + 8 + 4 + 4 + 1;

    /// Decode from a frame body
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < Self::WIRE_LEN {
            return Err(FrameError::UnexpectedEof);
        }
        Ok(Self {
            x: buf.get_f64(),
            y: buf.get_f64(),
            z: buf.get_f64(),
            yaw: buf.get_f32(),
            pitch: buf.get_f32(),
            flags: buf.get_u8(),
        })
    }

    /// Encode to a frame body
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WIRE_LEN);
        buf.put_f64(self.x);
        buf.put_f64(self.y);
        buf.put_f64(self.z);
        buf.put_f32(self.yaw);
        buf.put_f32(self.pitch);
        buf.put_u8(self.flags);
        buf.freeze()
    }
}

/// Dimension prefix shared by login and respawn frames
///
/// Both frame kinds start with a signed dimension id; whatever follows is
/// irrelevant to tracking and left unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionChange {
    pub dimension_id: i32,
}

impl DimensionChange {
    const WIRE_LEN: usize = 4;

    /// Decode from a frame body
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < Self::WIRE_LEN {
            return Err(FrameError::UnexpectedEof);
        }
        Ok(Self {
            dimension_id: buf.get_i32(),
        })
    }

    /// Encode to a frame body
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WIRE_LEN);
        buf.put_i32(self.dimension_id);
        buf.freeze()
    }

    /// The recognized dimension, if any
    pub fn dimension(&self) -> Option<Dimension> {
        Dimension::from_id(self.dimension_id)
    }
}

//! World identity payload codec
//!
//! The base wire protocol only carries a coarse dimension id, which cannot
//! distinguish two worlds sharing a dimension. A cooperating agent on the
//! authoritative endpoint pushes the real identity over the tagged side
//! channel:
//!
//! ```text
//! u64 UUID most-significant half (BE) | u64 least-significant half (BE) | name = remaining UTF-8 bytes
//! ```
//!
//! The name has no length prefix; it runs to the end of the payload.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::error::FrameError;
use crate::protocol::constants::{WORLD_MESSAGE_TAG, WORLD_UUID_LEN};
use crate::protocol::TaggedMessage;

/// Stable identity of one world on the authoritative endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldIdentity {
    pub uuid: Uuid,
    pub name: String,
}

impl WorldIdentity {
    /// Create a world identity
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }

    /// Decode from a side-channel payload
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < WORLD_UUID_LEN {
            return Err(FrameError::UnexpectedEof);
        }
        let hi = buf.get_u64();
        let lo = buf.get_u64();
        let name_bytes = buf.copy_to_bytes(buf.remaining());
        let name = std::str::from_utf8(&name_bytes)
            .map_err(|_| FrameError::InvalidUtf8)?
            .to_owned();
        Ok(Self {
            uuid: Uuid::from_u64_pair(hi, lo),
            name,
        })
    }

    /// Encode to a side-channel payload
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(WORLD_UUID_LEN + self.name.len());
        let (hi, lo) = self.uuid.as_u64_pair();
        buf.put_u64(hi);
        buf.put_u64(lo);
        buf.put_slice(self.name.as_bytes());
        buf.freeze()
    }

    /// Decode from a tagged message, checking the tag first
    ///
    /// Returns `Ok(None)` for a foreign tag — the channel is shared with
    /// unrelated payloads, so a non-matching tag is not an error and its
    /// payload is never touched. Errors only on a matching tag with a
    /// malformed payload.
    pub fn from_tagged(msg: &TaggedMessage, tag: &str) -> Result<Option<Self>, FrameError> {
        if msg.tag != tag {
            return Ok(None);
        }
        let mut payload = msg.data.clone();
        Self::decode(&mut payload).map(Some)
    }

    /// Wrap in a tagged message under the default world tag
    pub fn to_tagged(&self) -> TaggedMessage {
        TaggedMessage::new(WORLD_MESSAGE_TAG, self.encode())
    }
}

impl std::fmt::Display for WorldIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.uuid)
    }
}

//! Tagged message codec
//!
//! The general-purpose side channel multiplexes unrelated application
//! payloads over one frame kind, distinguished by a short string tag:
//!
//! ```text
//! u16 tag length | tag bytes (UTF-8) | payload = remaining bytes
//! ```
//!
//! This codec only splits tag from payload; payload interpretation belongs
//! to whoever owns the tag (see [`crate::bridge`] for the world-identity
//! payload).

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::FrameError;

/// A tag-routed application message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMessage {
    /// Routing tag
    pub tag: String,
    /// Opaque payload, owned by the tag's protocol
    pub data: Bytes,
}

impl TaggedMessage {
    /// Create a tagged message
    pub fn new(tag: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            tag: tag.into(),
            data: data.into(),
        }
    }

    /// Decode from a frame body
    pub fn decode(buf: &mut Bytes) -> Result<Self, FrameError> {
        if buf.remaining() < 2 {
            return Err(FrameError::UnexpectedEof);
        }
        let len = buf.get_u16() as usize;
        if buf.remaining() < len {
            return Err(FrameError::UnexpectedEof);
        }
        let tag_bytes = buf.copy_to_bytes(len);
        let tag = std::str::from_utf8(&tag_bytes)
            .map_err(|_| FrameError::InvalidUtf8)?
            .to_owned();
        let data = buf.copy_to_bytes(buf.remaining());
        Ok(Self { tag, data })
    }

    /// Encode to a frame body
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(2 + self.tag.len() + self.data.len());
        buf.put_u16(self.tag.len() as u16);
        buf.put_slice(self.tag.as_bytes());
        buf.put_slice(&self.data);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let msg = TaggedMessage::new("LAPIW", &b"payload bytes"[..]);
        let mut encoded = msg.encode();
        let decoded = TaggedMessage::decode(&mut encoded).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_empty_payload() {
        let msg = TaggedMessage::new("PING", Bytes::new());
        let mut encoded = msg.encode();
        let decoded = TaggedMessage::decode(&mut encoded).unwrap();
        assert_eq!(decoded.tag, "PING");
        assert!(decoded.data.is_empty());
    }

    #[test]
    fn test_truncated_tag() {
        let mut buf = BytesMut::new();
        buf.put_u16(10);
        buf.put_slice(b"abc");
        assert_eq!(
            TaggedMessage::decode(&mut buf.freeze()),
            Err(FrameError::UnexpectedEof)
        );
    }

    #[test]
    fn test_missing_length_prefix() {
        let mut buf = Bytes::from_static(&[0x01]);
        assert_eq!(
            TaggedMessage::decode(&mut buf),
            Err(FrameError::UnexpectedEof)
        );
    }

    #[test]
    fn test_invalid_utf8_tag() {
        let mut buf = BytesMut::new();
        buf.put_u16(2);
        buf.put_slice(&[0xFF, 0xFE]);
        assert_eq!(
            TaggedMessage::decode(&mut buf.freeze()),
            Err(FrameError::InvalidUtf8)
        );
    }
}

//! # codec
//!
//! why: map log indices onto keys whose byte order is their numeric order, and entries onto bytes
//! relations: used by raft-storage for every key and value it writes, and by storage.rs for u64 facts
//! what: encode_index/decode_index, EntryCodec trait, JsonCodec

use crate::error::CodecError;
use crate::log::LogEntry;

/// width of an encoded index in bytes
pub const INDEX_LEN: usize = 8;

/// encode an index as 8 big-endian bytes
///
/// lexicographic order of the output matches numeric order of the input,
/// which is what lets a sorted engine answer first/last/range queries
pub fn encode_index(index: u64) -> [u8; INDEX_LEN] {
    index.to_be_bytes()
}

/// decode 8 big-endian bytes back into an index
///
/// any other length is rejected rather than truncated or padded
pub fn decode_index(bytes: &[u8]) -> Result<u64, CodecError> {
    let raw: [u8; INDEX_LEN] = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidIndexLength(bytes.len()))?;
    Ok(u64::from_be_bytes(raw))
}

/// serialization boundary for log entries
///
/// storage treats the output as opaque bytes
pub trait EntryCodec: Send + Sync {
    /// serialize an entry
    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>, CodecError>;

    /// deserialize an entry, failing on malformed input
    fn decode(&self, bytes: &[u8]) -> Result<LogEntry, CodecError>;
}

/// default codec: serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EntryCodec for JsonCodec {
    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(entry).map_err(CodecError::encode)
    }

    fn decode(&self, bytes: &[u8]) -> Result<LogEntry, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogKind;

    #[test]
    fn index_is_big_endian() {
        assert_eq!(encode_index(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(encode_index(0x0102), [0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(encode_index(u64::MAX), [0xFF; 8]);
    }

    #[test]
    fn decode_rejects_short_and_long_buffers() {
        assert!(matches!(
            decode_index(&[1, 2, 3]),
            Err(CodecError::InvalidIndexLength(3))
        ));
        assert!(matches!(
            decode_index(&[0; 9]),
            Err(CodecError::InvalidIndexLength(9))
        ));
        assert!(matches!(
            decode_index(&[]),
            Err(CodecError::InvalidIndexLength(0))
        ));
    }

    #[test]
    fn json_codec_keeps_every_field() {
        let entry = LogEntry::with_kind(4, 9, LogKind::Configuration, vec![0x00, 0xFF, 0x7F]);
        let bytes = JsonCodec.encode(&entry).unwrap();
        assert_eq!(JsonCodec.decode(&bytes).unwrap(), entry);
    }

    #[test]
    fn json_codec_rejects_garbage() {
        let err = JsonCodec.decode(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}

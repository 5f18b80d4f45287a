//! Store-assigned document identifiers.
//!
//! Twelve bytes in the ObjectId layout: a big-endian seconds timestamp, five
//! bytes of per-process randomness, and a big-endian counter. Rendered as 24
//! lowercase hex characters. Ids minted by one process sort in creation
//! order, which is what the in-memory store uses as its native order.
//!
//! The counter starts at zero and is 24 bits wide. Ordering holds until it
//! wraps, which takes more than 16.7 million ids within a single second.

use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;

const LEN: usize = 12;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| rand::thread_rng().r#gen());
static COUNTER: AtomicU32 = AtomicU32::new(0);

/// A 12-byte document identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; LEN]);

/// The string is not 24 hex characters.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid document id: expected 24 hex characters")]
pub struct InvalidId(pub String);

impl DocumentId {
    /// Mints a fresh id.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parses the 24-character hex form. Upper-case digits are accepted.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        let mut bytes = [0u8; LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidId(s.to_owned()))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({self})")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_24_lowercase_hex() {
        let id = DocumentId::generate().to_hex();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| DocumentId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn sequential_ids_sort_in_creation_order() {
        let ids: Vec<_> = (0..1000).map(|_| DocumentId::generate()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let hex: Vec<_> = ids.iter().map(DocumentId::to_hex).collect();
        assert!(hex.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parse_accepts_own_output() {
        let id = DocumentId::generate();
        assert_eq!(DocumentId::parse(&id.to_hex()), Ok(id));
        assert_eq!(DocumentId::parse(&id.to_hex().to_uppercase()), Ok(id));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "abc", "not-an-object-id", "zzzzzzzzzzzzzzzzzzzzzzzz", "0123456789abcdef012345678"] {
            assert_eq!(DocumentId::parse(bad), Err(InvalidId(bad.to_owned())));
        }
    }
}

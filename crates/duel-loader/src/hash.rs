//! Content checksums for uploads
//!
//! Provides [`ContentKey`], a 32-byte Blake3 digest of raw upload bytes used
//! to recognise re-uploads of identical content.

use std::fmt::{self, Display, Formatter};

/// Blake3 digest of upload bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentKey([u8; 32]);

impl ContentKey {
    /// Wrap raw digest bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the digest of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(ContentKey::compute(b"a,b\n1,2"), ContentKey::compute(b"a,b\n1,2"));
        assert_ne!(ContentKey::compute(b"a,b\n1,2"), ContentKey::compute(b"a,b\n1,3"));
    }

    #[test]
    fn display_is_full_hex() {
        let key = ContentKey::compute(b"data");
        assert_eq!(key.to_string().len(), 64);
        assert_eq!(key.short().len(), 16);
        assert!(key.to_string().starts_with(&key.short()));
    }
}

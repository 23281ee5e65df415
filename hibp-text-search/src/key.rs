use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::Error;
use crate::{HEX_CHARS, HEX_CHARS_LOWER, PREFIX_LEN};

/// Letter case used when rendering a digest as hex.
///
/// Record comparison is byte-wise, so this has to match the case convention of the
/// files being searched. The Pwned Passwords dumps are uppercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestCase {
    #[default]
    Upper,
    Lower,
}

/// A 40 byte search key, compared against the start of every record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey([u8; PREFIX_LEN]);

impl HashKey {
    /// Validates `s` as a search key.
    ///
    /// Any 40 byte ASCII string is accepted and its case is kept as is. Hex digits are
    /// not enforced: a key that is not hex simply never matches a well formed record.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let bytes = s.as_bytes();
        if bytes.len() != PREFIX_LEN || !bytes.is_ascii() {
            return Err(Error::InvalidKey { len: bytes.len() });
        }

        let mut key = [0u8; PREFIX_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Computes the hex SHA1 digest of the UTF-8 bytes of `secret`.
    pub fn digest(secret: &str, case: DigestCase) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(secret.as_bytes());
        let hash: [u8; 20] = hasher.finalize().into();

        let table = match case {
            DigestCase::Upper => HEX_CHARS,
            DigestCase::Lower => HEX_CHARS_LOWER,
        };

        let mut key = [0u8; PREFIX_LEN];
        for (i, byte) in hash.iter().enumerate() {
            key[i * 2] = table[(byte >> 4) as usize];
            key[i * 2 + 1] = table[(byte & 0x0f) as usize];
        }

        Self(key)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; PREFIX_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: constructed only from ASCII (validated input or the hex tables)
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashKey").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_uppercase() {
        // password123 -> SHA1: CBFDAC6008F9CAB4083784CBD1874F76618D2A97
        let key = HashKey::digest("password123", DigestCase::Upper);
        assert_eq!(key.as_str(), "CBFDAC6008F9CAB4083784CBD1874F76618D2A97");
    }

    #[test]
    fn test_digest_lowercase() {
        let key = HashKey::digest("password123", DigestCase::Lower);
        assert_eq!(key.as_str(), "cbfdac6008f9cab4083784cbd1874f76618d2a97");
    }

    #[test]
    fn test_digest_empty_secret() {
        // SHA1 of the empty string
        let key = HashKey::digest("", DigestCase::Upper);
        assert_eq!(key.to_string(), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
    }

    #[test]
    fn test_parse_keeps_case() {
        let key = HashKey::parse("cbfdac6008f9cab4083784cbd1874f76618d2a97").unwrap();
        assert_eq!(key.as_str(), "cbfdac6008f9cab4083784cbd1874f76618d2a97");
        assert_ne!(key, HashKey::digest("password123", DigestCase::Upper));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(HashKey::parse("ABC"), Err(Error::InvalidKey { len: 3 })));
        assert!(matches!(
            HashKey::parse(&"A".repeat(PREFIX_LEN + 1)),
            Err(Error::InvalidKey { len: 41 })
        ));
        assert!(matches!(HashKey::parse(""), Err(Error::InvalidKey { len: 0 })));
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        // 20 two-byte characters: 40 bytes but not ASCII
        let secret = "é".repeat(20);
        assert_eq!(secret.len(), PREFIX_LEN);
        assert!(HashKey::parse(&secret).is_err());
    }
}

use std::borrow::Cow;
use std::fmt;

/// One candidate plaintext found for a queried hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackResult {
    plaintext: Vec<u8>,
    given_hash: Vec<u8>,
    computed_hash: Vec<u8>,
    algorithm: &'static str,
}

impl CrackResult {
    pub fn new(
        plaintext: Vec<u8>,
        given_hash: Vec<u8>,
        computed_hash: Vec<u8>,
        algorithm: &'static str,
    ) -> Self {
        Self { plaintext, given_hash, computed_hash, algorithm }
    }

    /// The dictionary word, as raw bytes.
    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// The dictionary word, with invalid UTF-8 replaced.
    pub fn plaintext_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.plaintext)
    }

    /// The bytes decoded from the caller's query.
    pub fn given_hash(&self) -> &[u8] {
        &self.given_hash
    }

    /// The full digest of [`plaintext`](Self::plaintext).
    pub fn computed_hash(&self) -> &[u8] {
        &self.computed_hash
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// True when the query was the complete digest of the plaintext, false
    /// when only a prefix of it is known to match.
    pub fn is_full_match(&self) -> bool {
        self.given_hash == self.computed_hash
    }
}

impl fmt::Display for CrackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(&self.given_hash), self.plaintext_lossy())?;
        if !self.is_full_match() {
            f.write_str(" (partial match)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const GRAPE_MD5: [u8; 16] = hex!("b781cbb29054db12f88f08c6e161c199");

    #[test]
    fn test_full_match() {
        let result = CrackResult::new(b"grape".to_vec(), GRAPE_MD5.to_vec(), GRAPE_MD5.to_vec(), "md5");
        assert!(result.is_full_match());
        assert_eq!(result.to_string(), "b781cbb29054db12f88f08c6e161c199:grape");
    }

    #[test]
    fn test_prefix_is_partial_match() {
        let result =
            CrackResult::new(b"grape".to_vec(), GRAPE_MD5[..8].to_vec(), GRAPE_MD5.to_vec(), "md5");
        assert!(!result.is_full_match());
        assert_eq!(result.to_string(), "b781cbb29054db12:grape (partial match)");
    }

    #[test]
    fn test_differing_tail_is_partial_match() {
        let mut given = GRAPE_MD5;
        given[15] ^= 1;
        let result = CrackResult::new(b"grape".to_vec(), given.to_vec(), GRAPE_MD5.to_vec(), "md5");
        assert!(!result.is_full_match());
    }

    #[test]
    fn test_lossy_plaintext() {
        let result = CrackResult::new(vec![b'a', 0xFF], vec![], vec![], "md5");
        assert_eq!(result.plaintext_lossy(), "a\u{FFFD}");
    }
}

use digest::Digest;
use md4::Md4;

use crate::error::{Error, Result};

/// UTF-16LE encodes a UTF-8 password.
#[inline]
fn utf16_le(password: &[u8]) -> Result<Vec<u8>> {
    let password =
        std::str::from_utf8(password).map_err(|_| Error::InvalidEncoding { algorithm: "NTLM" })?;
    Ok(password.encode_utf16().flat_map(u16::to_le_bytes).collect())
}

/// Hashes a password using NTLM.
#[inline]
pub fn ntlm(password: &[u8]) -> Result<[u8; 16]> {
    Ok(Md4::digest(utf16_le(password)?).into())
}

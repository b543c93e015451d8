//! Hash algorithms a lookup table can be built for.
//!
//! The set is closed: library digests are wrapped by [`StandardDigest`], and
//! the legacy and composite schemes that no digest library ships as-is get a
//! variant of their own on [`HashAlgorithm`].

mod lm;
mod ntlm;
mod standard;

use digest::Digest;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::Sha512;

use crate::error::{Error, Result};

pub use lm::{expand_des_key, lm};
pub use ntlm::ntlm;
pub use standard::StandardDigest;

/// Default header of a Qubes OS 3.1 backup. The passphrase is the HMAC key
/// and this header is the message.
pub const QUBES_V31_BACKUP_HEADER: &[u8] = b"version=3\nhmac-algorithm=SHA512\n\
crypto-algorithm=aes-256-cbc\nencrypted=True\ncompressed=False\n";

/// Names of the algorithms that are not plain library digests.
pub const EXTRA_ALGORITHM_NAMES: [&str; 5] =
    ["LM", "NTLM", "md5(md5)", "MySQL4.1+", "QubesV3.1BackupDefaults"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Standard(StandardDigest),
    /// LAN Manager.
    Lm,
    /// MD4 over the UTF-16LE encoded password.
    Ntlm,
    /// MD5 of the lowercase hex MD5 of the password.
    Md5Md5,
    /// SHA-1 of the raw SHA-1 of the password.
    MySql41,
    /// HMAC-SHA512 keyed by the password over [`QUBES_V31_BACKUP_HEADER`].
    QubesV31Backup,
}

impl HashAlgorithm {
    /// Looks up an algorithm by its case-sensitive name.
    pub fn from_name(name: &str) -> Result<Self> {
        if let Some(digest) = StandardDigest::from_name(name) {
            return Ok(Self::Standard(digest));
        }
        match name {
            "LM" => Ok(Self::Lm),
            "NTLM" => Ok(Self::Ntlm),
            "md5(md5)" => Ok(Self::Md5Md5),
            "MySQL4.1+" => Ok(Self::MySql41),
            "QubesV3.1BackupDefaults" => Ok(Self::QubesV31Backup),
            _ => Err(Error::UnknownAlgorithm(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard(digest) => digest.name(),
            Self::Lm => "LM",
            Self::Ntlm => "NTLM",
            Self::Md5Md5 => "md5(md5)",
            Self::MySql41 => "MySQL4.1+",
            Self::QubesV31Backup => "QubesV3.1BackupDefaults",
        }
    }

    /// Computes the raw digest of `input`.
    ///
    /// NTLM fails on input that is not UTF-8.
    pub fn digest(&self, input: &[u8]) -> Result<Vec<u8>> {
        let digest = match self {
            Self::Standard(digest) => digest.digest(input),
            Self::Lm => lm(input).to_vec(),
            Self::Ntlm => ntlm(input)?.to_vec(),
            Self::Md5Md5 => {
                let inner = hex::encode(Md5::digest(input));
                Md5::digest(inner.as_bytes()).to_vec()
            }
            Self::MySql41 => Sha1::digest(Sha1::digest(input)).to_vec(),
            Self::QubesV31Backup => {
                let mut mac = <Hmac<Sha512> as Mac>::new_from_slice(input)
                    .map_err(|_| Error::KeyInit { algorithm: self.name() })?;
                mac.update(QUBES_V31_BACKUP_HEADER);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(digest)
    }

    /// Computes the digest of `input` as lowercase hex.
    pub fn hex_digest(&self, input: &[u8]) -> Result<String> {
        self.digest(input).map(hex::encode)
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every algorithm name [`HashAlgorithm::from_name`] accepts, library digests
/// first.
pub fn algorithm_names() -> Vec<&'static str> {
    StandardDigest::ALL
        .iter()
        .map(|d| d.name())
        .chain(EXTRA_ALGORITHM_NAMES)
        .collect()
}

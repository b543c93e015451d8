use digest::Digest;
use md4::Md4;
use md5::Md5;
use ripemd::{Ripemd128, Ripemd160, Ripemd256, Ripemd320};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use whirlpool::Whirlpool;

/// Digests delegated to library implementations, named the way common
/// hashing front ends spell them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StandardDigest {
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512_224,
    Sha512_256,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Ripemd128,
    Ripemd160,
    Ripemd256,
    Ripemd320,
    Whirlpool,
    Crc32b,
}

impl StandardDigest {
    pub const ALL: [StandardDigest; 19] = [
        Self::Md4,
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Ripemd128,
        Self::Ripemd160,
        Self::Ripemd256,
        Self::Ripemd320,
        Self::Whirlpool,
        Self::Crc32b,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Md4 => "md4",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512_224 => "sha512/224",
            Self::Sha512_256 => "sha512/256",
            Self::Sha512 => "sha512",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Ripemd128 => "ripemd128",
            Self::Ripemd160 => "ripemd160",
            Self::Ripemd256 => "ripemd256",
            Self::Ripemd320 => "ripemd320",
            Self::Whirlpool => "whirlpool",
            Self::Crc32b => "crc32b",
        }
    }

    /// Case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn digest(self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Md4 => digest_with::<Md4>(input),
            Self::Md5 => digest_with::<Md5>(input),
            Self::Sha1 => digest_with::<Sha1>(input),
            Self::Sha224 => digest_with::<Sha224>(input),
            Self::Sha256 => digest_with::<Sha256>(input),
            Self::Sha384 => digest_with::<Sha384>(input),
            Self::Sha512_224 => digest_with::<Sha512_224>(input),
            Self::Sha512_256 => digest_with::<Sha512_256>(input),
            Self::Sha512 => digest_with::<Sha512>(input),
            Self::Sha3_224 => digest_with::<Sha3_224>(input),
            Self::Sha3_256 => digest_with::<Sha3_256>(input),
            Self::Sha3_384 => digest_with::<Sha3_384>(input),
            Self::Sha3_512 => digest_with::<Sha3_512>(input),
            Self::Ripemd128 => digest_with::<Ripemd128>(input),
            Self::Ripemd160 => digest_with::<Ripemd160>(input),
            Self::Ripemd256 => digest_with::<Ripemd256>(input),
            Self::Ripemd320 => digest_with::<Ripemd320>(input),
            Self::Whirlpool => digest_with::<Whirlpool>(input),
            // Big-endian, the byte order the checksum is conventionally printed in.
            Self::Crc32b => crc32fast::hash(input).to_be_bytes().to_vec(),
        }
    }
}

#[inline]
fn digest_with<D: Digest>(input: &[u8]) -> Vec<u8> {
    D::digest(input).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_names_round_trip() {
        for d in StandardDigest::ALL {
            assert_eq!(StandardDigest::from_name(d.name()), Some(d));
        }
        assert_eq!(StandardDigest::from_name("MD5"), None);
        assert_eq!(StandardDigest::from_name("sha-1"), None);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(StandardDigest::Md5.digest(b"grape"), hex!("b781cbb29054db12f88f08c6e161c199"));
        assert_eq!(
            StandardDigest::Sha1.digest(b"test"),
            hex!("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3")
        );
        assert_eq!(
            StandardDigest::Sha256.digest(b"test"),
            hex!("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")
        );
        assert_eq!(StandardDigest::Md4.digest(b"test"), hex!("db346d691d7acc4dc2625db19f9e3f52"));
        assert_eq!(
            StandardDigest::Ripemd160.digest(b"test"),
            hex!("5e52fee47e6b070565f74372468cdc699de89107")
        );
        assert_eq!(StandardDigest::Crc32b.digest(b"test"), hex!("d87f7e0c"));
    }

    #[test]
    fn test_whirlpool_empty() {
        assert_eq!(
            StandardDigest::Whirlpool.digest(b""),
            hex!(
                "19fa61d75522a4669b44e39c1d2e1726c530232130d407f89afee0964997f7a7"
                "3e83be698b288febcf88e3e03c4f0757ea8964e59b63d93708b138cc42a66eb3"
            )
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(StandardDigest::Sha512_224.digest(b"x").len(), 28);
        assert_eq!(StandardDigest::Sha3_384.digest(b"x").len(), 48);
        assert_eq!(StandardDigest::Ripemd320.digest(b"x").len(), 40);
        assert_eq!(StandardDigest::Crc32b.digest(b"x").len(), 4);
    }
}

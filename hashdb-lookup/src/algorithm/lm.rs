//! LAN Manager password hash.
//!
//! The password is uppercased and fitted to 14 bytes, each 7-byte half is
//! stretched into a DES key, and each key encrypts the constant `KGS!@#$%`.

use des::Des;
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockEncrypt, KeyInit};

/// Plaintext block encrypted under both half-keys.
const LM_MAGIC: &[u8; 8] = b"KGS!@#$%";

/// Passwords are truncated (or zero-padded) to this many bytes.
const LM_PASSWORD_LEN: usize = 14;

const LM_HALF_LEN: usize = LM_PASSWORD_LEN / 2;

/// Hashes a password with LM, returning the 16-byte digest.
pub fn lm(password: &[u8]) -> [u8; 16] {
    let mut halves = [[0u8; LM_HALF_LEN]; 2];
    for (i, &b) in password.iter().take(LM_PASSWORD_LEN).enumerate() {
        halves[i / LM_HALF_LEN][i % LM_HALF_LEN] = b.to_ascii_uppercase();
    }

    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encrypt_magic(&expand_des_key(&halves[0])));
    out[8..].copy_from_slice(&encrypt_magic(&expand_des_key(&halves[1])));
    out
}

/// Spreads 56 key bits over 8 bytes, 7 bits per byte, leaving the low
/// (parity) bit of each byte clear.
#[inline]
pub fn expand_des_key(half: &[u8; LM_HALF_LEN]) -> [u8; 8] {
    let k = half;
    [
        k[0] & 0xFE,
        (k[0] << 7) | (k[1] >> 1),
        (k[1] << 6) | (k[2] >> 2),
        (k[2] << 5) | (k[3] >> 3),
        (k[3] << 4) | (k[4] >> 4),
        (k[4] << 3) | (k[5] >> 5),
        (k[5] << 2) | (k[6] >> 6),
        k[6] << 1,
    ]
}

fn encrypt_magic(key: &[u8; 8]) -> [u8; 8] {
    let des = Des::new(key.as_slice().into());
    let mut block = GenericArray::clone_from_slice(LM_MAGIC);
    des.encrypt_block(&mut block);

    let mut out = [0u8; 8];
    out.copy_from_slice(&block);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_expand_des_key() {
        assert_eq!(expand_des_key(b"PASSWOR"), hex!("5020546a35ba3da4"));
        assert_eq!(expand_des_key(&[0u8; 7]), [0u8; 8]);
        assert!(expand_des_key(&[0xFF; 7]).iter().all(|b| b & 1 == 0));
    }

    #[test]
    fn test_halves_are_seven_byte_keys() {
        let digest = lm(b"passwor");
        assert_eq!(&digest[..8], &encrypt_magic(&expand_des_key(b"PASSWOR")));
        assert_eq!(&digest[8..], &encrypt_magic(&expand_des_key(&[0; 7])));
        assert_eq!(&digest[8..], &hex!("aad3b435b51404ee"));
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(lm(b"password"), hex!("e52cac67419a9a224a3b108f3fa6cb6d"));
        assert_eq!(lm(b"PASSWORD"), hex!("e52cac67419a9a224a3b108f3fa6cb6d"));
        assert_eq!(lm(b"PASSWORD123!"), hex!("e52cac67419a9a22c17ec4fe2a5374cb"));
        assert_eq!(lm(b"test"), hex!("01fc5a6be7bc6929aad3b435b51404ee"));
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(lm(b""), hex!("aad3b435b51404eeaad3b435b51404ee"));
    }

    #[test]
    fn test_truncates_to_fourteen_bytes() {
        assert_eq!(lm(b"abcdefghijklmnopq"), hex!("e0c510199cc66abd8c51ec214bebdea1"));
        assert_eq!(lm(b"abcdefghijklmnopq"), lm(b"ABCDEFGHIJKLMN"));
    }
}

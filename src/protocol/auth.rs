//! `mysql_native_password` scramble computation.
//!
//! See <https://mariadb.com/kb/en/connection/#mysql_native_password-plugin>.

use memchr::memchr;
use sha1::{Digest, Sha1};

pub const NATIVE_PASSWORD: &str = "mysql_native_password";

/// Computes the client auth response for `mysql_native_password` given the server's nonce
/// (the 20-byte scramble from the handshake packet, still carrying its 8+12 split and the
/// trailing NUL the protocol sends it with).
///
/// An empty password yields an empty response, per the protocol: the server compares this
/// against its own record of an empty password hash rather than running the XOR formula.
pub fn scramble(password: &str, nonce: &[u8]) -> Vec<u8> {
    if password.is_empty() {
        return Vec::new();
    }

    let end = memchr(b'\0', nonce).unwrap_or(nonce.len());
    let seed = &nonce[..end];

    // SHA1(password) XOR SHA1(seed + SHA1(SHA1(password)))
    let pw_hash = Sha1::digest(password.as_bytes());
    let pw_hash_hash = Sha1::digest(pw_hash);

    let mut ctx = Sha1::new();
    ctx.update(seed);
    ctx.update(pw_hash_hash);
    let seed_hash = ctx.finalize();

    let mut out: Vec<u8> = pw_hash.to_vec();
    for (byte, seed_byte) in out.iter_mut().zip(seed_hash.iter()) {
        *byte ^= seed_byte;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_returns_an_empty_response_for_an_empty_password() {
        assert!(scramble("", b"whatever-nonce-data-").is_empty());
    }

    #[test]
    fn it_is_deterministic_for_a_fixed_nonce() {
        let nonce = b"01234567890123456789\0";
        let a = scramble("hunter2", nonce);
        let b = scramble("hunter2", nonce);

        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn it_differs_for_different_passwords() {
        let nonce = b"01234567890123456789\0";
        assert_ne!(scramble("hunter2", nonce), scramble("hunter3", nonce));
    }
}

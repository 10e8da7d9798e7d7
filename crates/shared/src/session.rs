//! Opaque session token generation.
//!
//! Sign-in issues a random token carried in an httpOnly cookie. The admin
//! route gate only checks for the cookie's presence; credential verification
//! happens once at sign-in.

use rand::RngCore;

/// Byte length of a session token before hex encoding.
const TOKEN_BYTES: usize = 32;

/// Generate a new hex-encoded session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}

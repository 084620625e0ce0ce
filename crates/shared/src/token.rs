//! Check-in token generation.
//!
//! Every registration gets an opaque token that the client renders as a QR
//! code. Scanning it at the gate looks the registration up by exact match,
//! so the token only needs to be unguessable and URL-safe.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Prefix identifying check-in tokens, useful when one shows up in logs.
pub const TOKEN_PREFIX: &str = "cmp_";

/// Number of random bytes behind each token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generates a new check-in token: `cmp_` followed by 43 URL-safe
/// base64 characters.
pub fn generate_checkin_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", TOKEN_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

/// Returns true if the string has the shape of a check-in token.
///
/// Lookups still go to the database either way; this is a cheap filter so
/// obviously malformed scans fail fast without a query.
pub fn looks_like_checkin_token(token: &str) -> bool {
    let Some(rest) = token.strip_prefix(TOKEN_PREFIX) else {
        return false;
    };
    !rest.is_empty()
        && rest.len() <= 64
        && rest
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

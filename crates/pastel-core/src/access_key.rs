//! Access keys: the external, URL-facing identifier of a memo.
//!
//! A key is the lowercase hex SHA-1 of `"{timestamp} -- {body} -- {nonce}"`.
//! The nonce comes from the thread-local CSPRNG, so two identical bodies
//! submitted within the same second still get distinct keys. Uniqueness is
//! ultimately enforced by storage; a collision fails the insert.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha1::{Digest, Sha1};

/// Length of a hex-encoded SHA-1 digest.
pub const ACCESS_KEY_LEN: usize = 40;

/// Generate a fresh access key for `body` created at `now`.
pub fn generate(body: &str, now: DateTime<Utc>) -> String {
    let nonce: u64 = rand::thread_rng().gen();
    derive(now.timestamp(), body, nonce)
}

/// Deterministic part of key generation.
pub fn derive(timestamp: i64, body: &str, nonce: u64) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{timestamp} -- {body} -- {nonce}").as_bytes());
    format!("{:x}", hasher.finalize())
}

/// True if `s` has the shape of an access key (40 lowercase hex chars).
pub fn is_valid(s: &str) -> bool {
    s.len() == ACCESS_KEY_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

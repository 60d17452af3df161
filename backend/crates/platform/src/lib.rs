//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business vocabulary:
//! - Password policy and Argon2id hashing
//! - HMAC-SHA256 signing, randomness and base64 helpers

pub mod crypto;
pub mod password;

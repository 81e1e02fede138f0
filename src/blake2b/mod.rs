//! Keyless BLAKE2b (RFC 7693) and its Argon2-specific variable-length
//! extension H' (RFC 9106 §3.3).
//!
//! This is a from-scratch implementation; it exists so the Argon2id core in
//! this crate has no dependency on an external hash implementation whose
//! version or feature flags could silently drift the output.

mod constants;
mod core;
mod variable;

pub use self::core::{hash_64, hash_var};
pub use self::variable::{hash_prime, MAX_OUTPUT_LEN};

//! A from-scratch, bit-exact implementation of Argon2id (RFC 9106), the
//! memory-hard password hashing and key derivation function.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level API. Both Argon2id itself and
//! the BLAKE2b primitive it is built on are implemented here directly —
//! there is no dependency on an external hash implementation whose
//! version or feature flags could silently drift the output.
//!
//! # Module overview
//!
//! - [`blake2b`]
//!   Keyless BLAKE2b (RFC 7693) and its Argon2-specific variable-length
//!   extension H'. Used internally to build H0, the per-lane seed blocks,
//!   and the final tag.
//!
//! - [`argon2`]
//!   The Argon2id algorithm itself: parameter validation, the memory
//!   matrix and its Fill phase, reference-block selection, and the
//!   H0/finalize boundary operations. Re-exported at the crate root.
//!
//! # Example
//!
//! ```
//! use argon2id_core::{argon2id, Argon2Params};
//!
//! let params = Argon2Params::default();
//! let tag = argon2id(b"correct horse battery staple", b"a random salt!!!", &params)
//!     .expect("valid parameters");
//! assert_eq!(tag.len(), params.tag_len);
//! ```
//!
//! # Design goals
//!
//! - No external hashing dependency — BLAKE2b is implemented in this crate
//! - Minimal and explicit APIs
//! - Secret-derived memory is zeroized on drop, not left to the allocator
//! - No logging or diagnostics that could expose password-derived bytes
//!
//! This crate is not a general-purpose cryptography toolkit; it implements
//! one algorithm, completely and carefully.

pub mod argon2;
pub mod blake2b;

pub use argon2::{argon2id, argon2id_into, Argon2Error, Argon2Params, ParamsBuilder};

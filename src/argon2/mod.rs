//! Argon2id (RFC 9106): memory-hard password hashing and key derivation.
//!
//! Implements the algorithm end to end: H0 (`boundary`), per-lane seeding
//! and the Fill phase (`memory`, `reference`, `block`), and finalization
//! (`boundary`).

mod block;
mod boundary;
mod derive;
mod error;
mod memory;
mod params;
mod reference;

pub use derive::{argon2id, argon2id_into};
pub use error::Argon2Error;
pub use params::{Argon2Params, ParamsBuilder};
